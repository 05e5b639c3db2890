//! Heuristic English syllable counting
//!
//! Vowel-group counting with a silent-e adjustment. Not dictionary-backed,
//! so irregular words can be off by one; the aggregate formulas tolerate
//! that.

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Count syllables in one word
///
/// Counts maximal vowel runs, drops a trailing silent `e` (but keeps the
/// `-le` ending after a consonant, as in "table"), and never returns less
/// than 1 for a word containing letters.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut in_vowel_run = false;
    for &c in &letters {
        if is_vowel(c) {
            if !in_vowel_run {
                count += 1;
            }
            in_vowel_run = true;
        } else {
            in_vowel_run = false;
        }
    }

    // Silent trailing e: "make" has two vowel runs but one spoken syllable
    let n = letters.len();
    if n >= 2 && letters[n - 1] == 'e' && !is_vowel(letters[n - 2]) {
        let keeps_le = n >= 3 && letters[n - 2] == 'l' && !is_vowel(letters[n - 3]);
        if !keeps_le && count > 1 {
            count -= 1;
        }
    }

    count.max(1)
}

/// Words with three or more syllables, as used by SMOG
pub fn is_polysyllabic(word: &str) -> bool {
    count_syllables(word) >= 3
}
