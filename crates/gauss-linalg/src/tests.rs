//! Integration tests for gauss-linalg.

#[cfg(test)]
mod integration_tests {
    use approx::assert_abs_diff_eq;

    use crate::driver::{eliminate, Eliminator, Outcome};
    use crate::matrix::Matrix;
    use crate::EliminationConfig;

    fn system_3x3() -> Matrix {
        Matrix::from_rows(vec![
            vec![2.0, 1.0, 1.0, 5.0],
            vec![4.0, -6.0, 0.0, -2.0],
            vec![-2.0, 7.0, 2.0, 9.0],
        ])
        .unwrap()
    }

    /// Diagonally dominant `n x (n + 1)` system with a fixed pattern.
    fn dominant_system(n: usize) -> Matrix {
        let rows = (0..n)
            .map(|i| {
                (0..=n)
                    .map(|j| {
                        if i == j {
                            8.0 * n as f64
                        } else {
                            ((i * 7 + j * 3) % 11) as f64 - 5.0
                        }
                    })
                    .collect()
            })
            .collect();
        Matrix::from_rows(rows).unwrap()
    }

    /// Reads the solution out of a reduced, unit-diagonal augmented matrix.
    fn back_substitute(m: &Matrix) -> Vec<f64> {
        let n = m.num_rows();
        let rhs = m.num_cols() - 1;
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let tail: f64 = (i + 1..n).map(|k| m[(i, k)] * x[k]).sum();
            x[i] = m[(i, rhs)] - tail;
        }
        x
    }

    /// Single-threaded textbook elimination used as a reference.
    fn reference(m: &mut Matrix) {
        let (rows, cols) = (m.num_rows(), m.num_cols());
        for p in 0..rows {
            for j in p + 1..rows {
                let coeff = m[(j, p)] / m[(p, p)];
                for k in 0..cols {
                    let delta = m[(p, k)] * coeff;
                    m[(j, k)] -= delta;
                }
            }
        }
        for i in 0..rows {
            let d = m[(i, i)];
            for k in 0..cols {
                m[(i, k)] /= d;
            }
        }
    }

    #[test]
    fn test_result_independent_of_worker_count() {
        let mut baseline = system_3x3();
        assert_eq!(eliminate(&mut baseline, 1).unwrap(), Outcome::Solved);

        for workers in [2, 3, 8] {
            let mut m = system_3x3();
            assert_eq!(eliminate(&mut m, workers).unwrap(), Outcome::Solved);
            assert_eq!(m, baseline, "workers = {workers}");
        }
    }

    #[test]
    fn test_solution_of_3x3_system() {
        let mut m = system_3x3();
        eliminate(&mut m, 3).unwrap();
        let x = back_substitute(&m);
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[2], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_sequential_reference() {
        let mut expected = dominant_system(24);
        reference(&mut expected);

        for workers in [1, 4, 7, 32] {
            let mut m = dominant_system(24);
            assert!(eliminate(&mut m, workers).unwrap().is_solved());
            assert_eq!(m, expected, "workers = {workers}");
        }
    }

    #[test]
    fn test_lower_triangle_cleared() {
        let mut m = dominant_system(12);
        eliminate(&mut m, 5).unwrap();
        for i in 0..m.num_rows() {
            assert_abs_diff_eq!(m[(i, i)], 1.0, epsilon = 1e-12);
            for j in 0..i {
                assert_abs_diff_eq!(m[(i, j)], 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_singular_for_every_worker_count() {
        for workers in [1, 2, 3, 8] {
            let mut m = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
            assert_eq!(
                eliminate(&mut m, workers).unwrap(),
                Outcome::Singular { pivot: 0 }
            );
        }
    }

    #[test]
    fn test_singular_midway_stops_at_same_pivot() {
        // Rows 0 and 1 agree on the leading two columns, so pivot 1 vanishes.
        let rows = vec![
            vec![1.0, 2.0, 3.0, 1.0],
            vec![2.0, 4.0, 7.0, 2.0],
            vec![1.0, 1.0, 1.0, 3.0],
        ];
        let mut first = None;
        for workers in [1, 2, 3, 8] {
            let mut m = Matrix::from_rows(rows.clone()).unwrap();
            let outcome = eliminate(&mut m, workers).unwrap();
            assert_eq!(outcome, Outcome::Singular { pivot: 1 });
            let state = first.get_or_insert_with(|| m.clone());
            assert_eq!(&m, state, "workers = {workers}");
        }
    }

    #[test]
    fn test_custom_tolerance() {
        let rows = vec![vec![1e-3, 1.0, 1.0], vec![1.0, 1.0, 2.0]];

        let strict = Eliminator::new(EliminationConfig::default().with_workers(2)).unwrap();
        let mut m = Matrix::from_rows(rows.clone()).unwrap();
        assert!(strict.eliminate(&mut m).unwrap().is_solved());

        let loose = Eliminator::new(
            EliminationConfig::default()
                .with_workers(2)
                .with_epsilon(1e-2),
        )
        .unwrap();
        let mut m = Matrix::from_rows(rows).unwrap();
        assert_eq!(loose.eliminate(&mut m).unwrap(), Outcome::Singular { pivot: 0 });
    }

    #[test]
    fn test_single_row() {
        let mut m = Matrix::from_rows(vec![vec![4.0, 8.0, -2.0]]).unwrap();
        assert!(eliminate(&mut m, 4).unwrap().is_solved());
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0, -0.5]]);
    }
}
