//! Property-based tests for partitioning and elimination.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::driver::{eliminate, normalize, Outcome};
    use crate::matrix::Matrix;
    use crate::partition::{partition, verify_plan, RowRange};

    // Strategy for a diagonally dominant augmented system, which never hits
    // a singular pivot.
    fn dominant_system() -> impl Strategy<Value = Matrix> {
        (1usize..12).prop_flat_map(|n| {
            prop::collection::vec(-10i32..=10, n * (n + 1)).prop_map(move |values| {
                let mut m = Matrix::from_vec(
                    n,
                    n + 1,
                    values.into_iter().map(f64::from).collect(),
                )
                .unwrap();
                for i in 0..n {
                    m[(i, i)] = 20.0 * n as f64 + 1.0;
                }
                m
            })
        })
    }

    proptest! {
        #[test]
        fn partition_covers_span(begin in 0usize..64, size in 0usize..200, workers in 1usize..40) {
            let end = begin + size;
            let plan = partition(begin, end, workers).unwrap();

            prop_assert_eq!(plan.len(), workers);
            prop_assert_eq!(plan.iter().map(RowRange::len).sum::<usize>(), size);
            prop_assert!(verify_plan(&plan, begin, end).is_ok());

            let base = size / workers;
            for pair in plan.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
                prop_assert!(pair[0].len() >= pair[1].len());
            }
            for range in &plan {
                prop_assert!(range.len() == base || range.len() == base + 1);
            }
        }

        #[test]
        fn partition_is_deterministic(begin in 0usize..64, size in 0usize..200, workers in 1usize..40) {
            prop_assert_eq!(
                partition(begin, begin + size, workers),
                partition(begin, begin + size, workers)
            );
        }

        #[test]
        fn elimination_independent_of_workers(m in dominant_system(), workers in 2usize..9) {
            let mut sequential = m.clone();
            let mut parallel = m;
            prop_assert_eq!(eliminate(&mut sequential, 1).unwrap(), Outcome::Solved);
            prop_assert_eq!(eliminate(&mut parallel, workers).unwrap(), Outcome::Solved);
            prop_assert_eq!(sequential, parallel);
        }

        #[test]
        fn normalization_idempotent(m in dominant_system()) {
            let mut m = m;
            eliminate(&mut m, 3).unwrap();
            let once = m.clone();
            normalize(&mut m);
            prop_assert_eq!(&m, &once);
            for i in 0..m.num_rows() {
                prop_assert!((m[(i, i)] - 1.0).abs() < 1e-12);
            }
        }

        #[test]
        fn zero_leading_pivot_always_singular(n in 2usize..8, workers in 1usize..9) {
            let mut m = Matrix::<f64>::zeros(n, n + 1).unwrap();
            for i in 1..n {
                m[(i, i)] = 1.0;
            }
            m[(1, 0)] = 1.0;
            prop_assert_eq!(eliminate(&mut m, workers).unwrap(), Outcome::Singular { pivot: 0 });
        }
    }
}
