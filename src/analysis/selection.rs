//! Percentage computation, threshold selection and output rounding.
//!
//! Percentages are exact decimals. The threshold is always compared against
//! the unrounded value; rounding only happens when shaping output rows.

use rust_decimal::Decimal;

use crate::config::RoundingMode;
use crate::models::{DepartmentAggregate, ResultRecord};

/// Computes `qualifying * 100 / total`.
///
/// Returns `None` when `total` is zero instead of dividing by zero.
///
/// # Examples
///
/// ```
/// use engagement_analysis::analysis::compute_percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(compute_percentage(1, 2), Some(Decimal::new(50, 0)));
/// assert_eq!(compute_percentage(0, 0), None);
/// ```
pub fn compute_percentage(qualifying: u64, total: u64) -> Option<Decimal> {
    // Multiplying first keeps ratios like 401/800 exact
    (Decimal::from(qualifying) * Decimal::ONE_HUNDRED).checked_div(Decimal::from(total))
}

/// Keeps aggregates whose unrounded percentage is strictly above `threshold`.
///
/// Aggregates without a percentage are never selected.
pub fn select_above_threshold(
    aggregates: &[DepartmentAggregate],
    threshold: Decimal,
) -> Vec<&DepartmentAggregate> {
    aggregates
        .iter()
        .filter(|aggregate| aggregate.percentage.is_some_and(|p| p > threshold))
        .collect()
}

/// Rounds to `precision` decimal places and pads to exactly that scale.
///
/// # Examples
///
/// ```
/// use engagement_analysis::analysis::round_percentage;
/// use engagement_analysis::config::RoundingMode;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("50.125").unwrap();
/// assert_eq!(round_percentage(value, 2, RoundingMode::HalfAwayFromZero).to_string(), "50.13");
/// assert_eq!(round_percentage(value, 2, RoundingMode::HalfEven).to_string(), "50.12");
/// assert_eq!(round_percentage(Decimal::ONE_HUNDRED, 2, RoundingMode::HalfEven).to_string(), "100.00");
/// ```
pub fn round_percentage(value: Decimal, precision: u32, mode: RoundingMode) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(precision, mode.strategy());
    rounded.rescale(precision);
    rounded
}

/// Shapes selected aggregates into output rows, ordered by department.
pub fn format_results(
    selected: &[&DepartmentAggregate],
    precision: u32,
    mode: RoundingMode,
) -> Vec<ResultRecord> {
    let mut results: Vec<ResultRecord> = selected
        .iter()
        .filter_map(|aggregate| {
            aggregate.percentage.map(|percentage| ResultRecord {
                department: aggregate.department.clone(),
                percentage: round_percentage(percentage, precision, mode),
            })
        })
        .collect();

    results.sort_by(|a, b| a.department.cmp(&b.department));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fifty() -> Decimal {
        dec("50")
    }

    #[test]
    fn test_percentage_two_of_three() {
        let percentage = compute_percentage(2, 3).unwrap();
        assert_eq!(round_percentage(percentage, 2, RoundingMode::HalfAwayFromZero), dec("66.67"));
    }

    #[test]
    fn test_percentage_zero_qualifying_is_zero() {
        assert_eq!(compute_percentage(0, 7), Some(Decimal::ZERO));
    }

    #[test]
    fn test_percentage_zero_total_is_guarded() {
        assert_eq!(compute_percentage(3, 0), None);
    }

    #[test]
    fn test_percentage_is_exact_for_midpoint_ratio() {
        assert_eq!(compute_percentage(401, 800), Some(dec("50.125")));
    }

    #[test]
    fn test_exactly_fifty_is_excluded() {
        let aggregates = vec![DepartmentAggregate::new("D2", 2, 1)];
        assert!(select_above_threshold(&aggregates, fifty()).is_empty());
    }

    #[test]
    fn test_just_above_fifty_is_included() {
        // 501 / 1000 = 50.1
        let aggregates = vec![DepartmentAggregate::new("D1", 1000, 501)];
        assert_eq!(select_above_threshold(&aggregates, fifty()).len(), 1);
    }

    #[test]
    fn test_comparison_uses_unrounded_value() {
        // 50.001% rounds to 50.00 but is still strictly above 50
        let aggregates = vec![DepartmentAggregate::new("D1", 100_000, 50_001)];
        let selected = select_above_threshold(&aggregates, fifty());
        assert_eq!(selected.len(), 1);

        let results = format_results(&selected, 2, RoundingMode::HalfAwayFromZero);
        assert_eq!(results[0].percentage.to_string(), "50.00");
    }

    #[test]
    fn test_value_rounding_up_to_threshold_stays_excluded() {
        // 49.999% would round to 50.00, but the unrounded value is below
        let aggregates = vec![DepartmentAggregate::new("D1", 100_000, 49_999)];
        assert!(select_above_threshold(&aggregates, fifty()).is_empty());
    }

    #[test]
    fn test_missing_percentage_is_never_selected() {
        let aggregates = vec![DepartmentAggregate::new("Ghost", 0, 0)];
        assert!(select_above_threshold(&aggregates, Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(
            round_percentage(dec("50.125"), 2, RoundingMode::HalfAwayFromZero),
            dec("50.13")
        );
        assert_eq!(
            round_percentage(dec("50.135"), 2, RoundingMode::HalfAwayFromZero),
            dec("50.14")
        );
    }

    #[test]
    fn test_midpoint_rounds_half_even() {
        assert_eq!(round_percentage(dec("50.125"), 2, RoundingMode::HalfEven), dec("50.12"));
        assert_eq!(round_percentage(dec("50.135"), 2, RoundingMode::HalfEven), dec("50.14"));
    }

    #[test]
    fn test_rounding_pads_scale() {
        assert_eq!(
            round_percentage(dec("75"), 2, RoundingMode::HalfAwayFromZero).to_string(),
            "75.00"
        );
        assert_eq!(
            round_percentage(dec("75.5"), 0, RoundingMode::HalfAwayFromZero).to_string(),
            "76"
        );
    }

    #[test]
    fn test_format_sorts_by_department() {
        let aggregates = vec![
            DepartmentAggregate::new("Zeta", 1, 1),
            DepartmentAggregate::new("Alpha", 3, 2),
        ];
        let selected: Vec<&DepartmentAggregate> = aggregates.iter().collect();

        let results = format_results(&selected, 2, RoundingMode::HalfAwayFromZero);
        assert_eq!(results[0].department, "Alpha");
        assert_eq!(results[0].percentage.to_string(), "66.67");
        assert_eq!(results[1].department, "Zeta");
        assert_eq!(results[1].percentage.to_string(), "100.00");
    }
}
