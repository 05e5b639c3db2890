//! Text-report formatting helpers shared by the subcommands

/// Section heading, `=== Title ===`
pub fn heading(title: &str) -> String {
    format!("=== {title} ===")
}

/// Horizontal rule of `-` characters
pub fn rule(width: usize) -> String {
    "-".repeat(width)
}

/// Count with its share of a total, `12 (34.5%)`
pub fn count_pct(count: usize, total: usize) -> String {
    format!("{count} ({:.1}%)", percentage(count, total))
}

/// Percentage of a total, 0.0 when the total is zero
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

/// P-value with four decimals, `<0.0001` below display precision
pub fn fmt_p(p: f64) -> String {
    if p < 1e-4 {
        "<0.0001".to_string()
    } else {
        format!("{p:.4}")
    }
}

/// Confidence interval bounds, `[1.2, 3.4]`
pub fn fmt_ci(low: f64, high: f64) -> String {
    format!("[{low:.1}, {high:.1}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading() {
        assert_eq!(heading("Overall"), "=== Overall ===");
    }

    #[test]
    fn test_rule_width() {
        assert_eq!(rule(5), "-----");
        assert_eq!(rule(0), "");
    }

    #[test]
    fn test_count_pct() {
        assert_eq!(count_pct(12, 48), "12 (25.0%)");
        assert_eq!(count_pct(1, 3), "1 (33.3%)");
    }

    #[test]
    fn test_count_pct_zero_total() {
        assert_eq!(count_pct(0, 0), "0 (0.0%)");
    }

    #[test]
    fn test_fmt_p_rounding() {
        assert_eq!(fmt_p(0.0432), "0.0432");
        assert_eq!(fmt_p(0.5), "0.5000");
    }

    #[test]
    fn test_fmt_p_tiny() {
        assert_eq!(fmt_p(3.2e-7), "<0.0001");
    }

    #[test]
    fn test_fmt_ci() {
        assert_eq!(fmt_ci(1.25, 3.4), "[1.2, 3.4]");
    }
}
