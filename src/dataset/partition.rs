//! Deterministic grouping of records by a categorical key
//!
//! Groups are disjoint, keep their rows in input order, and together hold
//! every record whose key was present. Records without a key are not silently
//! dropped: their count travels with the partition so reports can state it.

/// Records grouped by a categorical key, plus the count of records excluded
/// for a missing key
#[derive(Debug, Clone)]
pub struct Partition<T> {
    groups: Vec<(String, Vec<T>)>,
    /// Records whose key was absent
    pub excluded: usize,
}

impl<T> Partition<T> {
    /// Rows for one key, if that key occurred
    pub fn get(&self, key: &str) -> Option<&[T]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, rows)| rows.as_slice())
    }

    /// Rows for one key, empty when the key never occurred
    pub fn get_or_empty(&self, key: &str) -> &[T] {
        self.get(key).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups.iter().map(|(k, rows)| (k.as_str(), rows.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total rows across all groups (the input size minus `excluded`)
    pub fn total_rows(&self) -> usize {
        self.groups.iter().map(|(_, rows)| rows.len()).sum()
    }

    /// Reorder groups by key, ascending
    pub fn sorted_by_key(mut self) -> Self {
        self.groups.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }
}

/// Partition records by the key each one yields
///
/// Group order follows first appearance in the input; use
/// [`Partition::sorted_by_key`] when display order should be alphabetical.
pub fn partition_by<T, I, F>(records: I, key_fn: F) -> Partition<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<&str>,
{
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();
    let mut excluded = 0;

    for record in records {
        let Some(key) = key_fn(&record) else {
            excluded += 1;
            continue;
        };
        match groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, rows)) => rows.push(record),
            None => groups.push((key.to_string(), vec![record])),
        }
    }

    Partition { groups, excluded }
}
