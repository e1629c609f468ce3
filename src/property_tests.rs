//! Property-based tests for the metrics engine.

#[cfg(test)]
mod tests {
    use crate::anomaly::{is_anomaly, Deviation};
    use crate::metrics::*;
    use crate::table::MetricsTable;
    use proptest::prelude::*;

    proptest! {
        /// Same inputs, same outputs: no hidden state between calls.
        #[test]
        fn prop_metric_functions_idempotent(
            a in -1e6f64..1e6,
            b in -1e6f64..1e6,
            c in -1e3f64..1e3,
            day in -365i64..365,
            errors in 0u64..1000,
            total in 0u64..1000,
        ) {
            prop_assert_eq!(time_saved(a, b), time_saved(a, b));
            prop_assert_eq!(roi(a, b), roi(a, b));
            prop_assert_eq!(data_quality(errors, total), data_quality(errors, total));
            prop_assert_eq!(efficiency_over_time(day, c), efficiency_over_time(day, c));
            prop_assert_eq!(pipeline_success(a, b, c), pipeline_success(a, b, c));
            prop_assert_eq!(is_anomaly(a, b, c.abs(), 2.0), is_anomaly(a, b, c.abs(), 2.0));
        }

        /// The ramp never leaves [0, max] for a non-negative max.
        #[test]
        fn prop_efficiency_bounded(day in any::<i64>(), max in 0.0f64..10.0) {
            let e = efficiency_over_time(day, max);
            prop_assert!((0.0..=max).contains(&e));
        }

        /// Row count always equals input length for equal-length columns.
        #[test]
        fn prop_table_row_count(
            rows in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 0..64),
            k in 0.0f64..5.0,
        ) {
            let (a, b): (Vec<f64>, Vec<f64>) = rows.iter().copied().unzip();
            let table = MetricsTable::builder()
                .deviation(Deviation::Sample)
                .column("a", a, k)
                .column("b", b, k)
                .build()
                .unwrap();
            prop_assert_eq!(table.len(), rows.len());
        }

        /// Any length difference is rejected rather than truncated.
        #[test]
        fn prop_table_rejects_mismatch(len in 1usize..32, extra in 1usize..8) {
            let result = MetricsTable::builder()
                .column("a", vec![1.0; len], 2.0)
                .column("b", vec![1.0; len + extra], 2.0)
                .build();
            prop_assert!(result.is_err());
        }

        /// Data quality stays within [0, 1] when errors never exceed the total.
        #[test]
        fn prop_data_quality_unit_interval(total in 1u64..10_000, frac in 0.0f64..=1.0) {
            let errors = (total as f64 * frac).floor() as u64;
            let dq = data_quality(errors, total);
            prop_assert!((0.0..=1.0).contains(&dq));
        }
    }
}
