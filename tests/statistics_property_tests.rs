//! Property-based tests for the statistical core
//!
//! Random samples exercise the invariants the report pipeline leans on:
//! sign conventions under argument swaps, ordering of the multiple-testing
//! corrections, and interval containment.

use proptest::prelude::*;

use pubstats::analysis::{
    benjamini_hochberg, bonferroni, chi_squared_independence, hedges_g, mann_whitney_u,
    mean_difference_ci, summarize, welch_t_test, AnalysisConfig, ContingencyTable,
};
use pubstats::dataset::partition_by;
use pubstats::readability::count_syllables;

fn sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0..1000.0f64, 2..20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property: swapping the samples flips the t statistic and keeps p
    #[test]
    fn prop_welch_swap_flips_sign(a in sample(), b in sample()) {
        let config = AnalysisConfig::default();
        let ab = welch_t_test(&a, &b, &config).unwrap();
        let ba = welch_t_test(&b, &a, &config).unwrap();
        prop_assert!((ab.p_value - ba.p_value).abs() < 1e-12);
        if ab.statistic.is_finite() {
            let scale = 1.0 + ab.statistic.abs();
            prop_assert!((ab.statistic + ba.statistic).abs() < 1e-9 * scale);
        } else {
            prop_assert_eq!(ab.statistic, -ba.statistic);
        }
    }

    // Property: p-values live in [0, 1] and Welch df is positive
    #[test]
    fn prop_welch_p_value_bounded(a in sample(), b in sample()) {
        let result = welch_t_test(&a, &b, &AnalysisConfig::default()).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.p_value));
        if let Some(df) = result.df {
            prop_assert!(df > 0.0);
        }
    }

    // Property: U of one sample and U of the other sum to n1 * n2
    #[test]
    fn prop_mann_whitney_u_complement(a in sample(), b in sample()) {
        let config = AnalysisConfig::default();
        let ab = mann_whitney_u(&a, &b, &config).unwrap();
        let ba = mann_whitney_u(&b, &a, &config).unwrap();
        let product = (a.len() * b.len()) as f64;
        prop_assert!((ab.statistic + ba.statistic - product).abs() < 1e-9);
        prop_assert!((ab.p_value - ba.p_value).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&ab.p_value));
    }

    // Property: Hedges' g carries the sign of the mean difference
    #[test]
    fn prop_hedges_g_sign_matches_difference(a in sample(), b in sample()) {
        let config = AnalysisConfig::default();
        let g = hedges_g(&a, &b, &config).unwrap();
        let diff = a.iter().sum::<f64>() / a.len() as f64
            - b.iter().sum::<f64>() / b.len() as f64;
        if diff > 0.0 {
            prop_assert!(g >= 0.0);
        } else if diff < 0.0 {
            prop_assert!(g <= 0.0);
        }
    }

    // Property: the interval brackets the point estimate it is built around
    #[test]
    fn prop_difference_ci_contains_difference(a in sample(), b in sample()) {
        let ci = mean_difference_ci(&a, &b, &AnalysisConfig::default()).unwrap();
        prop_assert!(ci.ci_low <= ci.difference);
        prop_assert!(ci.difference <= ci.ci_high);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property: raw <= Benjamini-Hochberg <= Bonferroni <= 1 componentwise
    #[test]
    fn prop_corrections_ordered(ps in prop::collection::vec(0.0..1.0f64, 1..20)) {
        let bonf = bonferroni(&ps);
        let fdr = benjamini_hochberg(&ps);
        for ((&raw, &p), &q) in ps.iter().zip(&bonf).zip(&fdr) {
            prop_assert!(raw <= q + 1e-12);
            prop_assert!(q <= p + 1e-12);
            prop_assert!(p <= 1.0);
            prop_assert!(q <= 1.0);
        }
    }

    // Property: a smaller raw p never receives a larger FDR q
    #[test]
    fn prop_benjamini_hochberg_monotone(ps in prop::collection::vec(0.0..1.0f64, 2..20)) {
        let fdr = benjamini_hochberg(&ps);
        for i in 0..ps.len() {
            for j in 0..ps.len() {
                if ps[i] <= ps[j] {
                    prop_assert!(fdr[i] <= fdr[j] + 1e-12);
                }
            }
        }
    }

    // Property: quartiles are ordered and the CI brackets the mean
    #[test]
    fn prop_summary_internally_consistent(values in prop::collection::vec(-1000.0..1000.0f64, 2..40)) {
        let summary = summarize(&values, &AnalysisConfig::default()).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(summary.sd >= 0.0);
        prop_assert!(summary.sem >= 0.0);
        prop_assert!(min <= summary.q1);
        prop_assert!(summary.q1 <= summary.median);
        prop_assert!(summary.median <= summary.q3);
        prop_assert!(summary.q3 <= max);
        prop_assert!(summary.ci_low <= summary.mean);
        prop_assert!(summary.mean <= summary.ci_high);
    }

    // Property: chi-squared on a dense table yields a bounded p and df 1
    #[test]
    fn prop_chi_squared_bounded(counts in prop::collection::vec(1..60u64, 4)) {
        let table = ContingencyTable {
            rows: vec!["v1.0".to_string(), "v2.0".to_string()],
            cols: vec!["No".to_string(), "Yes".to_string()],
            counts: vec![
                vec![counts[0], counts[1]],
                vec![counts[2], counts[3]],
            ],
        };
        let result = chi_squared_independence(&table).unwrap();
        prop_assert!(result.statistic >= 0.0);
        prop_assert!((0.0..=1.0).contains(&result.p_value));
        prop_assert_eq!(result.df, Some(1.0));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property: grouping loses no record and repeats no key
    #[test]
    fn prop_partition_accounts_for_every_record(
        records in prop::collection::vec((prop::option::of(0u8..4), any::<i32>()), 0..50)
    ) {
        let keyed: Vec<(Option<String>, i32)> = records
            .iter()
            .map(|(key, value)| (key.map(|k| format!("v{k}.0")), *value))
            .collect();
        let partition = partition_by(keyed.clone(), |r| r.0.as_deref());

        prop_assert_eq!(partition.total_rows() + partition.excluded, keyed.len());
        let keys: Vec<&str> = partition.keys().collect();
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), keys.len());
    }

    // Property: any word with letters has at least one syllable
    #[test]
    fn prop_syllables_at_least_one(word in "[a-zA-Z]{1,15}") {
        prop_assert!(count_syllables(&word) >= 1);
    }
}
