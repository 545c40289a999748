//! Relative pressure index shared by zones (ZPI) and regimes (PPI).

/// Ceiling of every pressure index.
pub const MAX_PRESSURE: f64 = 100.0;

/// Pressure of `count` relative to the busiest member of its cohort.
///
/// `0.0` when `cohort_max` is zero; otherwise `count / cohort_max * 100`,
/// capped at 100 and rounded to one decimal place. The cohort maximum maps
/// to exactly `100.0`.
#[allow(clippy::cast_precision_loss)]
pub fn pressure_index(count: u64, cohort_max: u64) -> f64 {
    if cohort_max == 0 {
        return 0.0;
    }
    let ratio = count as f64 / cohort_max as f64 * MAX_PRESSURE;
    round_one_decimal(ratio.min(MAX_PRESSURE))
}

/// Round to one decimal place, ties to even on the exact binary value.
///
/// Fixed-precision formatting is correctly rounded, so `6.25` becomes `6.2`
/// and `0.35` (stored just below the tie) becomes `0.3`.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}")
        .parse()
        .unwrap_or_else(|_| (value * 10.0).round_ties_even() / 10.0)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn fixed_points() {
        assert_eq!(pressure_index(0, 100), 0.0);
        assert_eq!(pressure_index(100, 100), 100.0);
        assert_eq!(pressure_index(150, 100), 100.0);
        assert_eq!(pressure_index(7, 0), 0.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(pressure_index(5, 40), 12.5);
        assert_eq!(pressure_index(1, 3), 33.3);
        assert_eq!(pressure_index(2, 3), 66.7);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(pressure_index(1, 16), 6.2);
        assert_eq!(pressure_index(200, 3200), 6.2);
        assert_eq!(pressure_index(3, 16), 18.8);
        assert_eq!(pressure_index(1, 400), 0.2);
        assert_eq!(pressure_index(3, 400), 0.8);
    }

    proptest! {
        #[test]
        fn bounded_between_zero_and_one_hundred(count in 0_u64..1_000_000, max in 0_u64..1_000_000) {
            let p = pressure_index(count, max);
            prop_assert!((0.0..=MAX_PRESSURE).contains(&p));
        }

        #[test]
        fn non_decreasing_in_count(count in 0_u64..100_000, step in 0_u64..1000, max in 1_u64..100_000) {
            prop_assert!(pressure_index(count, max) <= pressure_index(count.saturating_add(step), max));
        }

        #[test]
        fn cohort_max_is_exactly_one_hundred(max in 1_u64..10_000_000) {
            prop_assert_eq!(pressure_index(max, max), MAX_PRESSURE);
        }
    }
}
