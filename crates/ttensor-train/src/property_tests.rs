//! Property-based tests for TT decomposition and algebra
//!
//! Inputs are closed-form fields parameterised by a proptest-drawn phase, so
//! failures shrink to reproducible shapes and phases.

#[cfg(test)]
mod tests {
    use crate::{
        frobenius_norm_squared, full, round, to_tt_matrix, to_tt_tensor, tt_sparse_flat_inner,
        tt_tt_flat_inner, tt_tt_matmul, MatrixShape,
    };
    use proptest::prelude::*;
    use ttensor_core::DenseND;
    use ttensor_sparse::CooTensor;

    // SVD-heavy bodies; keep the case count small
    fn proptest_config() -> ProptestConfig {
        ProptestConfig {
            cases: 8,
            max_local_rejects: 1000,
            max_global_rejects: 10000,
            ..ProptestConfig::default()
        }
    }

    fn field(shape: &[usize], phase: f64) -> DenseND<f64> {
        DenseND::from_fn(shape, |idx| {
            let s: f64 = idx
                .iter()
                .enumerate()
                .map(|(k, &i)| (phase * (k + 1) as f64 + 0.7 * i as f64).sin())
                .sum();
            s + 0.3 * (phase * idx.iter().sum::<usize>() as f64).cos()
        })
    }

    fn full_rank_bound(shape: &[usize]) -> usize {
        let total: usize = shape.iter().product();
        (1..shape.len())
            .map(|cut| {
                let left: usize = shape[..cut].iter().product();
                left.min(total / left)
            })
            .max()
            .unwrap_or(1)
    }

    fn dense_matmul(a: &DenseND<f64>, b: &DenseND<f64>) -> DenseND<f64> {
        let (m, n, p) = (a.shape()[0], a.shape()[1], b.shape()[1]);
        DenseND::from_fn(&[m, p], |idx| {
            (0..n).map(|k| a[&[idx[0], k][..]] * b[&[k, idx[1]][..]]).sum()
        })
    }

    // Property: a non-binding rank bound reproduces the input
    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tt_round_trip_exact_when_rank_nonbinding(
            shape in prop::collection::vec(2usize..5, 2..5),
            phase in 0.1f64..3.0,
        ) {
            let x = field(&shape, phase);
            let tt = to_tt_tensor(&x, full_rank_bound(&shape), None)
                .expect("decomposition should succeed");
            let err = tt.relative_error(&x).expect("shapes should agree");
            prop_assert!(err < 1e-10, "relative error {} for shape {:?}", err, shape);
        }
    }

    // Property: a sum of one-mode terms has TT-rank exactly 2 at every cut
    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tt_additive_field_has_rank_two(
            shape in prop::collection::vec(3usize..6, 2..5),
            phase in 0.1f64..3.0,
        ) {
            let x = DenseND::from_fn(&shape, |idx| {
                idx.iter()
                    .enumerate()
                    .map(|(k, &i)| (phase * (k + 1) as f64 + 0.7 * i as f64).sin())
                    .sum::<f64>()
            });
            let tt = to_tt_tensor(&x, 10, None).expect("decomposition should succeed");
            let ranks = tt.get_tt_ranks();
            prop_assert_eq!(ranks[0], 1);
            prop_assert_eq!(ranks[shape.len()], 1);
            prop_assert!(ranks[1..shape.len()].iter().all(|&r| r == 2), "ranks {:?}", ranks);
            let err = tt.relative_error(&x).expect("shapes should agree");
            prop_assert!(err < 1e-10, "relative error {} for shape {:?}", err, shape);
        }
    }

    // Property: realized ranks never exceed the bound and end in 1
    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tt_ranks_respect_bound(
            shape in prop::collection::vec(2usize..6, 2..5),
            bound in 1usize..4,
            phase in 0.1f64..3.0,
        ) {
            let tt = to_tt_tensor(&field(&shape, phase), bound, None)
                .expect("decomposition should succeed");
            let ranks = tt.get_tt_ranks();
            prop_assert_eq!(ranks.len(), shape.len() + 1);
            prop_assert_eq!(ranks[0], 1);
            prop_assert_eq!(ranks[shape.len()], 1);
            prop_assert!(ranks.iter().all(|&r| r >= 1 && r <= bound));
            let reconstructed = full(&tt).expect("reconstruction");
            prop_assert_eq!(reconstructed.shape(), &shape[..]);
        }
    }

    // Property: epsilon bounds the relative reconstruction error
    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tt_epsilon_bounds_error(
            shape in prop::collection::vec(3usize..5, 3..5),
            eps in 1e-3f64..1e-1,
            phase in 0.1f64..3.0,
        ) {
            let x = field(&shape, phase);
            let tt = to_tt_tensor(&x, 64, Some(eps)).expect("decomposition should succeed");
            let err = tt.relative_error(&x).expect("shapes should agree");
            prop_assert!(err <= eps * 1.01, "error {} exceeds epsilon {}", err, eps);
        }
    }

    // Property: TT inner product equals the dense one
    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tt_flat_inner_matches_dense(
            shape in prop::collection::vec(2usize..5, 1..4),
            bound_a in 1usize..4,
            bound_b in 1usize..4,
            phase in 0.1f64..3.0,
        ) {
            let ta = to_tt_tensor(&field(&shape, phase), bound_a, None).expect("decompose a");
            let tb = to_tt_tensor(&field(&shape, phase + 1.0), bound_b, None).expect("decompose b");
            let expected = full(&ta).expect("full a").flat_inner(&full(&tb).expect("full b"))
                .expect("same shape");
            let got = tt_tt_flat_inner(&ta, &tb).expect("inner product");
            prop_assert!((got - expected).abs() <= 1e-9 * expected.abs().max(1.0));

            let norm_sq = frobenius_norm_squared(&ta).expect("norm");
            let dense_sq: f64 = full(&ta).expect("full a").iter().map(|v| v * v).sum();
            prop_assert!((norm_sq - dense_sq).abs() <= 1e-9 * dense_sq.max(1.0));
        }
    }

    // Property: TT-matrix product equals the dense product
    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tt_matmul_matches_dense(
            rows in prop::collection::vec(1usize..4, 2..4),
            phase in 0.1f64..3.0,
        ) {
            let d = rows.len();
            let inner: Vec<usize> = (0..d).map(|k| 2 + k % 2).collect();
            let cols: Vec<usize> = rows.iter().rev().copied().collect();
            let m: usize = rows.iter().product();
            let n: usize = inner.iter().product();
            let p: usize = cols.iter().product();

            let a = field(&[m, n], phase);
            let b = field(&[n, p], phase + 0.5);
            let ta = to_tt_matrix(&a, MatrixShape::new(&rows, &inner), 3, None).expect("decompose a");
            let tb = to_tt_matrix(&b, MatrixShape::new(&inner, &cols), 3, None).expect("decompose b");

            let product = tt_tt_matmul(&ta, &tb).expect("matmul");
            let expected = dense_matmul(&full(&ta).expect("full a"), &full(&tb).expect("full b"));
            let got = full(&product).expect("full product");
            prop_assert_eq!(got.shape(), &[m, p][..]);
            let scale = expected.frobenius_norm().max(1.0);
            prop_assert!(got.max_abs_diff(&expected).expect("same shape") <= 1e-9 * scale);
        }
    }

    // Property: sparse inner product equals a dense lookup
    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tt_sparse_inner_matches_lookup(
            shape in prop::collection::vec(2usize..5, 2..4),
            picks in prop::collection::vec((0usize..1000, -2.0f64..2.0), 0..8),
            phase in 0.1f64..3.0,
        ) {
            let tt = to_tt_tensor(&field(&shape, phase), 2, None).expect("decompose");
            let dense = full(&tt).expect("full");
            let total: usize = shape.iter().product();

            let mut indices = Vec::new();
            let mut values = Vec::new();
            for &(flat, v) in &picks {
                let mut rem = flat % total;
                let mut idx = vec![0; shape.len()];
                for k in (0..shape.len()).rev() {
                    idx[k] = rem % shape[k];
                    rem /= shape[k];
                }
                indices.push(idx);
                values.push(v);
            }
            let expected: f64 = indices.iter().zip(&values)
                .map(|(idx, v)| dense[idx.as_slice()] * v)
                .sum();
            let sparse = CooTensor::new(indices, values, shape.clone()).expect("valid sparse");
            let got = tt_sparse_flat_inner(&tt, &sparse).expect("sparse inner");
            prop_assert!((got - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }

    // Property: rounding never raises ranks and keeps the value when non-binding
    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn tt_round_preserves_value(
            shape in prop::collection::vec(2usize..5, 2..5),
            phase in 0.1f64..3.0,
        ) {
            let tt = to_tt_tensor(&field(&shape, phase), 8, None).expect("decompose");
            let rounded = round(&tt, 8, None).expect("round");
            for (r, s) in rounded.get_tt_ranks().iter().zip(tt.get_tt_ranks()) {
                prop_assert!(r <= s);
            }
            let err = rounded.relative_error(&full(&tt).expect("full")).expect("shapes");
            prop_assert!(err < 1e-10);
        }
    }
}
