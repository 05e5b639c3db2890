//! Contingency tables and the chi-squared test of independence

use std::collections::BTreeMap;

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::analysis::{TestKind, TestResult};
use crate::error::{AnalysisError, Result};

/// Cross-tabulation of two categorical variables
///
/// Row and column labels are kept in sorted order so the same input always
/// produces the same table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContingencyTable {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    /// counts[i][j] is the number of observations with row label i and
    /// column label j
    pub counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Build a table from (row label, column label) observation pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cells: BTreeMap<(String, String), u64> = BTreeMap::new();
        for (row, col) in pairs {
            *cells.entry((row.to_string(), col.to_string())).or_default() += 1;
        }

        let mut rows: Vec<String> = cells.keys().map(|(r, _)| r.clone()).collect();
        rows.dedup();
        let mut cols: Vec<String> = cells.keys().map(|(_, c)| c.clone()).collect();
        cols.sort();
        cols.dedup();

        let counts = rows
            .iter()
            .map(|r| {
                cols.iter()
                    .map(|c| {
                        cells
                            .get(&(r.clone(), c.clone()))
                            .copied()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self { rows, cols, counts }
    }

    /// Build a table directly from labels and a count matrix
    pub fn from_counts(rows: Vec<String>, cols: Vec<String>, counts: Vec<Vec<u64>>) -> Self {
        Self { rows, cols, counts }
    }

    pub fn count(&self, row: usize, col: usize) -> u64 {
        self.counts[row][col]
    }

    pub fn row_total(&self, row: usize) -> u64 {
        self.counts[row].iter().sum()
    }

    pub fn col_total(&self, col: usize) -> u64 {
        self.counts.iter().map(|r| r[col]).sum()
    }

    pub fn grand_total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.grand_total() == 0
    }
}

fn chi2_sf(stat: f64, df: f64) -> f64 {
    let dist = ChiSquared::new(df).unwrap();
    (1.0 - dist.cdf(stat)).clamp(0.0, 1.0)
}

/// Chi-squared test of independence on an r x c table
///
/// Rows and columns with a zero total are dropped before testing; the table
/// must retain at least two of each, otherwise the test is undefined and
/// `DegenerateTable` is returned. Expected counts are
/// `row total * column total / grand total`, degrees of freedom
/// `(r - 1)(c - 1)`. On 2x2 tables the Yates continuity correction is
/// applied: each |observed - expected| is reduced by 0.5, floored at zero.
pub fn chi_squared_independence(table: &ContingencyTable) -> Result<TestResult> {
    if table.is_empty() {
        return Err(AnalysisError::DegenerateTable(
            "all cells are zero".to_string(),
        ));
    }

    let live_rows: Vec<usize> = (0..table.rows.len())
        .filter(|&i| table.row_total(i) > 0)
        .collect();
    let live_cols: Vec<usize> = (0..table.cols.len())
        .filter(|&j| table.col_total(j) > 0)
        .collect();

    if live_rows.len() < 2 || live_cols.len() < 2 {
        return Err(AnalysisError::DegenerateTable(format!(
            "need at least 2 non-empty rows and columns, got {}x{}",
            live_rows.len(),
            live_cols.len()
        )));
    }

    let total = table.grand_total() as f64;
    let df = ((live_rows.len() - 1) * (live_cols.len() - 1)) as f64;
    let continuity = if df == 1.0 { 0.5 } else { 0.0 };

    let mut statistic = 0.0;
    for &i in &live_rows {
        let row_total = table.row_total(i) as f64;
        for &j in &live_cols {
            let expected = row_total * table.col_total(j) as f64 / total;
            let observed = table.count(i, j) as f64;
            let d = ((observed - expected).abs() - continuity).max(0.0);
            statistic += d * d / expected;
        }
    }

    let p_value = chi2_sf(statistic, df);

    Ok(TestResult {
        kind: TestKind::ChiSquared,
        statistic,
        p_value,
        df: Some(df),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_2x2(a: u64, b: u64, c: u64, d: u64) -> ContingencyTable {
        ContingencyTable::from_counts(
            vec!["r1".to_string(), "r2".to_string()],
            vec!["c1".to_string(), "c2".to_string()],
            vec![vec![a, b], vec![c, d]],
        )
    }

    #[test]
    fn test_from_pairs_counts_and_sorts() {
        let pairs = [
            ("v2.0", "Yes"),
            ("v1.0", "No"),
            ("v1.0", "Yes"),
            ("v1.0", "Yes"),
        ];
        let table = ContingencyTable::from_pairs(pairs);
        assert_eq!(table.rows, vec!["v1.0", "v2.0"]);
        assert_eq!(table.cols, vec!["No", "Yes"]);
        assert_eq!(table.counts, vec![vec![1, 2], vec![0, 1]]);
        assert_eq!(table.grand_total(), 4);
    }

    #[test]
    fn test_totals() {
        let table = table_2x2(10, 20, 30, 40);
        assert_eq!(table.row_total(0), 30);
        assert_eq!(table.row_total(1), 70);
        assert_eq!(table.col_total(0), 40);
        assert_eq!(table.col_total(1), 60);
        assert_eq!(table.grand_total(), 100);
    }

    #[test]
    fn test_independence_balanced_table() {
        // Perfectly proportional rows: statistic 0, p = 1
        let table = table_2x2(10, 20, 20, 40);
        let result = chi_squared_independence(&table).unwrap();
        assert!(result.statistic.abs() < 1e-9);
        assert!((result.p_value - 1.0).abs() < 1e-9);
        assert_eq!(result.df, Some(1.0));
    }

    #[test]
    fn test_independence_skewed_table() {
        // Strong association: counts concentrate on the diagonal
        let table = table_2x2(50, 5, 5, 50);
        let result = chi_squared_independence(&table).unwrap();
        assert!(result.statistic > 50.0);
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn test_independence_known_value() {
        // 2x2 shortcut with continuity correction:
        // chi2 = N * (|ad - bc| - N/2)^2 / (r1 * r2 * c1 * c2)
        let table = table_2x2(15, 35, 35, 25);
        let result = chi_squared_independence(&table).unwrap();
        let expected =
            110.0 * ((15.0 * 25.0 - 35.0 * 35.0f64).abs() - 55.0).powi(2) / (50.0 * 60.0 * 50.0 * 60.0);
        assert!((result.statistic - expected).abs() < 1e-9);
        assert!((result.statistic - 7.724_75).abs() < 1e-5);
    }

    #[test]
    fn test_independence_no_correction_above_2x2() {
        // On a 2x3 table the plain Pearson statistic is used
        let table = ContingencyTable::from_counts(
            vec!["a".to_string(), "b".to_string()],
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
            vec![vec![10, 20, 30], vec![30, 20, 10]],
        );
        let result = chi_squared_independence(&table).unwrap();
        assert_eq!(result.df, Some(2.0));
        // Expected counts are 20 everywhere; chi2 = 4 * 100 / 20
        assert!((result.statistic - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_independence_drops_empty_rows() {
        let table = ContingencyTable::from_counts(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["x".to_string(), "y".to_string()],
            vec![vec![10, 20], vec![0, 0], vec![20, 10]],
        );
        let result = chi_squared_independence(&table).unwrap();
        // Middle row is dropped, so df reflects a 2x2 table
        assert_eq!(result.df, Some(1.0));
    }

    #[test]
    fn test_independence_rejects_single_row() {
        let table = ContingencyTable::from_counts(
            vec!["only".to_string()],
            vec!["x".to_string(), "y".to_string()],
            vec![vec![5, 10]],
        );
        let err = chi_squared_independence(&table).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateTable(_)));
    }

    #[test]
    fn test_independence_rejects_all_zero() {
        let table = table_2x2(0, 0, 0, 0);
        let err = chi_squared_independence(&table).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateTable(_)));
    }

    #[test]
    fn test_independence_rejects_column_collapse() {
        // Second column is empty, leaving one live column
        let table = table_2x2(5, 0, 10, 0);
        let err = chi_squared_independence(&table).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateTable(_)));
    }
}
