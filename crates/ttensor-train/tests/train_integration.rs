//! Integration tests for Tensor-Train decomposition and algebra
//!
//! These tests drive the public API end to end: compression, reconstruction,
//! products, inner products and norms, plus the error taxonomy.

use ttensor_core::DenseND;
use ttensor_sparse::CooTensor;
use ttensor_train::{
    flat_inner, frobenius_norm, frobenius_norm_default, frobenius_norm_squared, full, matmul,
    round, to_tt_matrix, to_tt_tensor, tt_sparse_flat_inner, tt_tt_flat_inner, tt_tt_matmul,
    MatrixShape, MaxRank, Operand, RawShape, TensorTrain, TtError,
};

fn outer_product_123() -> DenseND<f64> {
    let a = [1.0, 2.0];
    let b = [3.0, 4.0];
    let c = [5.0, 6.0];
    DenseND::from_fn(&[2, 2, 2], |i| a[i[0]] * b[i[1]] * c[i[2]])
}

fn smooth(shape: &[usize]) -> DenseND<f64> {
    DenseND::from_fn(shape, |idx| {
        let t: f64 = idx
            .iter()
            .enumerate()
            .map(|(k, &i)| (i as f64 + 1.0) / (k as f64 + 2.0))
            .sum();
        1.0 / (1.0 + t)
    })
}

fn max_abs(x: &DenseND<f64>, y: &DenseND<f64>) -> f64 {
    x.max_abs_diff(y).expect("shapes should match")
}

#[test]
fn test_rank1_outer_product_scenario() {
    let x = outer_product_123();
    let tt = to_tt_tensor(&x, 5, None).unwrap();

    assert_eq!(tt.get_tt_ranks(), &[1, 1, 1, 1]);
    assert_eq!(tt.ndims(), 3);
    assert!(!tt.is_tt_matrix());

    let y = full(&tt).unwrap();
    assert_eq!(y.shape(), &[2, 2, 2]);
    assert!(max_abs(&x, &y) < 1e-10);

    let sum_sq: f64 = x.iter().map(|v| v * v).sum();
    let norm_sq = frobenius_norm_squared(&tt).unwrap();
    assert!((norm_sq - sum_sq).abs() < 1e-9 * sum_sq);
}

#[test]
fn test_2x2x2_rank2_is_exact() {
    let x = DenseND::<f64>::from_vec(vec![1.0, -2.0, 3.5, 0.0, 4.0, 1.0, -1.0, 2.0], &[2, 2, 2]).unwrap();
    let tt = to_tt_tensor(&x, 2, None).unwrap();
    assert_eq!(tt.get_tt_ranks(), &[1, 2, 2, 1]);
    assert!(max_abs(&x, &full(&tt).unwrap()) < 1e-10);
}

#[test]
fn test_known_tt_ranks_are_recovered() {
    let mixed = DenseND::<f64>::from_fn(&[2, 7, 3, 5], |i| {
        (0.1 * (i[0] + 2 * i[1] + 3 * i[2] + 5 * i[3]) as f64).cos() + (i[1] * i[3]) as f64
    });
    let tt = to_tt_tensor(&mixed, 100, None).unwrap();
    assert_eq!(tt.get_tt_ranks(), &[1, 2, 3, 3, 1]);
    assert!(tt.relative_error(&mixed).unwrap() < 1e-10);

    // three separable terms: rank 3 at every interior cut
    let three_terms = DenseND::<f64>::from_fn(&[3, 4, 5, 3], |idx| {
        let a: f64 = idx.iter().map(|&i| 1.0 + i as f64).product();
        let b: f64 = idx.iter().map(|&i| (0.4 * i as f64).cos()).product();
        let c: f64 = idx.iter().map(|&i| (-0.3 * i as f64).exp()).product();
        a + b + c
    });
    let tt = to_tt_tensor(&three_terms, 10, None).unwrap();
    assert_eq!(tt.get_tt_ranks(), &[1, 3, 3, 3, 1]);
    assert!(tt.relative_error(&three_terms).unwrap() < 1e-10);

    // a binding bound below the true rank loses accuracy
    let capped = to_tt_tensor(&three_terms, 2, None).unwrap();
    assert_eq!(capped.get_tt_ranks(), &[1, 2, 2, 2, 1]);
    assert!(capped.relative_error(&three_terms).unwrap() > 1e-10);
}

#[test]
fn test_known_rank_matrix_round_trip() {
    // A = B1 (x) C1 + B2 (x) C2 with B: 2x2 and C: 3x2 blocks, TT-rank 2
    let m = DenseND::<f64>::from_fn(&[6, 4], |i| {
        let (r0, r1) = (i[0] / 3, i[0] % 3);
        let (c0, c1) = (i[1] / 2, i[1] % 2);
        let b1 = (1 + r0 + 2 * c0) as f64;
        let c1_term = (1 + r1 * c1) as f64;
        let b2 = (r0 as f64 - c0 as f64).cos();
        let c2_term = (r1 as f64 + 0.5).powi(c1 as i32 + 1);
        b1 * c1_term + b2 * c2_term
    });
    let tt = to_tt_matrix(&m, MatrixShape::new(&[2, 3], &[2, 2]), 10, None).unwrap();
    assert_eq!(tt.get_tt_ranks(), &[1, 2, 1]);
    assert!(tt.relative_error(&m).unwrap() < 1e-10);
}

#[test]
fn test_error_decreases_with_rank() {
    let x = smooth(&[5, 5, 5, 5]);
    let errors: Vec<f64> = [1, 2, 3, 5, 25]
        .iter()
        .map(|&r| to_tt_tensor(&x, r, None).unwrap().relative_error(&x).unwrap())
        .collect();
    for pair in errors.windows(2) {
        assert!(pair[1] <= pair[0] * (1.0 + 1e-6) + 1e-12, "errors not monotone: {:?}", errors);
    }
    assert!(errors[4] < 1e-10);
}

#[test]
fn test_per_bond_rank_bounds() {
    let x = smooth(&[4, 4, 4, 4]);
    let tt = to_tt_tensor(&x, vec![1, 2, 3, 1, 1], None).unwrap();
    let ranks = tt.get_tt_ranks();
    assert!(ranks[1] <= 2);
    assert!(ranks[2] <= 3);
    assert_eq!(ranks[3], 1);
}

#[test]
fn test_epsilon_trades_rank_for_accuracy() {
    let x = smooth(&[6, 6, 6]);
    let exact = to_tt_tensor(&x, 36, None).unwrap();
    let loose = to_tt_tensor(&x, 36, Some(1e-2)).unwrap();
    assert!(loose.get_tt_ranks().iter().sum::<usize>() <= exact.get_tt_ranks().iter().sum::<usize>());
    assert!(loose.relative_error(&x).unwrap() <= 1e-2);
    assert!(loose.num_parameters() <= exact.num_parameters());
}

#[test]
fn test_matrix_round_trip() {
    let m = DenseND::<f64>::from_fn(&[8, 6], |i| ((i[0] * 6 + i[1]) as f64 * 0.21).sin());
    let tt = to_tt_matrix(&m, MatrixShape::new(&[2, 2, 2], &[3, 1, 2]), 50, None).unwrap();
    assert!(tt.is_tt_matrix());
    assert_eq!(tt.get_shape().as_slice(), &[8, 6]);
    assert_eq!(
        tt.get_raw_shape(),
        &RawShape::matrix(&[2, 2, 2], &[3, 1, 2])
    );
    assert!(max_abs(&m, &full(&tt).unwrap()) < 1e-9);
}

#[test]
fn test_vector_as_tt_matrix() {
    let v = DenseND::<f64>::from_fn(&[12, 1], |i| (i[0] as f64).sqrt());
    let tt = to_tt_matrix(&v, MatrixShape::column_vector(&[3, 4]), 10, None).unwrap();
    assert_eq!(tt.get_shape().as_slice(), &[12, 1]);
    assert!(max_abs(&v, &full(&tt).unwrap()) < 1e-9);
}

#[test]
fn test_matmul_against_dense() {
    let a = DenseND::<f64>::from_fn(&[4, 6], |i| 1.0 + (i[0] as f64) - 0.5 * i[1] as f64);
    let b = DenseND::<f64>::from_fn(&[6, 9], |i| ((i[0] + 2 * i[1]) as f64 * 0.3).cos());
    let ta = to_tt_matrix(&a, MatrixShape::new(&[2, 2], &[3, 2]), 10, None).unwrap();
    let tb = to_tt_matrix(&b, MatrixShape::new(&[3, 2], &[3, 3]), 10, None).unwrap();

    let c = tt_tt_matmul(&ta, &tb).unwrap();
    for k in 0..=2 {
        assert_eq!(c.get_tt_ranks()[k], ta.get_tt_ranks()[k] * tb.get_tt_ranks()[k]);
    }
    let dense_c = full(&c).unwrap();
    assert_eq!(dense_c.shape(), &[4, 9]);

    let fa = full(&ta).unwrap();
    let fb = full(&tb).unwrap();
    for i in 0..4 {
        for j in 0..9 {
            let expected: f64 = (0..6).map(|k| fa[&[i, k][..]] * fb[&[k, j][..]]).sum();
            assert!((dense_c[&[i, j][..]] - expected).abs() < 1e-9);
        }
    }

    let rounded = round(&c, 10, Some(1e-12)).unwrap();
    assert!(max_abs(&dense_c, &full(&rounded).unwrap()) < 1e-10 * dense_c.frobenius_norm());
}

#[test]
fn test_inner_products_and_norms() {
    let x = smooth(&[3, 4, 5]);
    let y = DenseND::<f64>::from_fn(&[3, 4, 5], |i| (i[0] + i[1] * i[2]) as f64);
    let tx = to_tt_tensor(&x, 20, None).unwrap();
    let ty = to_tt_tensor(&y, 20, None).unwrap();

    let expected = full(&tx).unwrap().flat_inner(&full(&ty).unwrap()).unwrap();
    let dot = tt_tt_flat_inner(&tx, &ty).unwrap();
    assert!((dot - expected).abs() < 1e-9 * expected.abs());

    let via_dispatch = flat_inner(Operand::from(&tx), Operand::from(&ty)).unwrap();
    assert!((via_dispatch - dot).abs() < 1e-12 * dot.abs());

    let sq = frobenius_norm_squared(&tx).unwrap();
    assert!((frobenius_norm(&tx, 0.25).unwrap() - (sq + 0.25).sqrt()).abs() < 1e-12);
    assert!((frobenius_norm_default(&tx).unwrap() - (sq + 1e-5).sqrt()).abs() < 1e-12);
}

#[test]
fn test_sparse_inner_product() {
    let m = DenseND::<f64>::from_fn(&[4, 9], |i| (i[0] * 9 + i[1]) as f64 / 10.0);
    let tt = to_tt_matrix(&m, MatrixShape::new(&[2, 2], &[3, 3]), 10, None).unwrap();
    let sparse = CooTensor::new(
        vec![vec![0, 0], vec![3, 8], vec![2, 4], vec![1, 7]],
        vec![1.0, 0.5, -2.0, 3.0],
        vec![4, 9],
    )
    .unwrap();
    let expected = 0.0 + 0.5 * 3.5 - 2.0 * 2.2 + 3.0 * 1.6;
    let got = tt_sparse_flat_inner(&tt, &sparse).unwrap();
    assert!((got - expected).abs() < 1e-9);

    let via_dispatch = flat_inner(Operand::from(&tt), Operand::from(&sparse)).unwrap();
    assert!((via_dispatch - got).abs() < 1e-12);
}

#[test]
fn test_sparse_operand_built_from_dense() {
    let m = DenseND::<f64>::from_fn(&[4, 9], |i| ((i[0] + 2 * i[1]) as f64 * 0.3).sin());
    let tt = to_tt_matrix(&m, MatrixShape::new(&[2, 2], &[3, 3]), 10, None).unwrap();

    // every third anti-diagonal
    let mask = DenseND::<f64>::from_fn(&[4, 9], |i| {
        if (i[0] + i[1]) % 3 == 0 {
            1.0 + i[1] as f64
        } else {
            0.0
        }
    });
    let sparse = CooTensor::from_dense(&mask, 0.0).unwrap();
    assert_eq!(sparse.nnz(), 12);
    assert!((sparse.density() - 12.0 / 36.0).abs() < 1e-12);
    assert_eq!(max_abs(&sparse.to_dense().unwrap(), &mask), 0.0);

    let expected = full(&tt).unwrap().flat_inner(&mask).unwrap();
    let got = tt_sparse_flat_inner(&tt, &sparse).unwrap();
    assert!((got - expected).abs() < 1e-10 * expected.abs().max(1.0));

    let by_entry: f64 = sparse
        .iter()
        .map(|(idx, &v)| v * tt.evaluate(idx).unwrap())
        .sum();
    assert!((got - by_entry).abs() < 1e-10 * by_entry.abs().max(1.0));
}

#[test]
fn test_sparse_repeated_coordinates_add() {
    let x = smooth(&[3, 4, 2]);
    let tt = to_tt_tensor(&x, 10, None).unwrap();

    let mut sparse = CooTensor::zeros(vec![3, 4, 2]).unwrap();
    sparse.push(vec![1, 2, 0], 2.0).unwrap();
    sparse.push(vec![1, 2, 0], 0.5).unwrap();
    sparse.push(vec![2, 3, 1], -1.0).unwrap();
    assert!(sparse.push(vec![3, 0, 0], 1.0).is_err());
    assert_eq!(sparse.nnz(), 3);

    let dense = sparse.to_dense().unwrap();
    assert_eq!(dense[&[1, 2, 0][..]], 2.5);

    let expected = 2.5 * x[&[1, 2, 0][..]] - x[&[2, 3, 1][..]];
    let got = tt_sparse_flat_inner(&tt, &sparse).unwrap();
    assert!((got - expected).abs() < 1e-10);
}

#[test]
fn test_direct_construction_and_evaluate() {
    // rank-2 train for X(i, j) = i + j over 3 x 3
    let g0 = DenseND::from_vec(vec![0.0, 1.0, 1.0, 1.0, 2.0, 1.0], &[1, 3, 2]).unwrap();
    let g1 = DenseND::from_vec(vec![1.0, 1.0, 1.0, 0.0, 1.0, 2.0], &[2, 3, 1]).unwrap();
    let tt = TensorTrain::new(vec![g0, g1], RawShape::tensor(&[3, 3])).unwrap();
    assert_eq!(tt.get_tt_ranks(), &[1, 2, 1]);
    for i in 0..3 {
        for j in 0..3 {
            assert!((tt.evaluate(&[i, j]).unwrap() - (i + j) as f64).abs() < 1e-12);
        }
    }
    assert_eq!(tt.num_parameters(), 12);
}

#[test]
fn test_invalid_arguments() {
    let x = outer_product_123();
    assert!(matches!(to_tt_tensor(&x, 0, None), Err(TtError::InvalidArgument(_))));
    assert!(matches!(to_tt_tensor(&x, 5, Some(-1.0)), Err(TtError::InvalidArgument(_))));
    assert!(matches!(
        to_tt_tensor(&x, MaxRank::PerBond(vec![1, 2, 1]), None),
        Err(TtError::InvalidArgument(_))
    ));
    assert!(matches!(
        to_tt_tensor(&x, vec![1, 0, 2, 1], None),
        Err(TtError::InvalidArgument(_))
    ));
}

#[test]
fn test_shape_errors() {
    let scalar = DenseND::<f64>::from_vec(vec![1.0], &[]).unwrap();
    assert!(matches!(to_tt_tensor(&scalar, 2, None), Err(TtError::ShapeError(_))));

    let m = DenseND::<f64>::ones(&[4, 4]);
    assert!(matches!(
        to_tt_matrix(&m, MatrixShape::new(&[2, 2], &[2]), 2, None),
        Err(TtError::ShapeError(_))
    ));
    assert!(matches!(
        to_tt_matrix(&m, MatrixShape::new(&[2, 3], &[2, 2]), 2, None),
        Err(TtError::ShapeError(_))
    ));

    let bad = TensorTrain::new(
        vec![DenseND::<f64>::ones(&[1, 2, 2]), DenseND::ones(&[3, 2, 1])],
        RawShape::tensor(&[2, 2]),
    );
    assert!(matches!(bad, Err(TtError::ShapeError(_))));

    let t2 = to_tt_tensor(&DenseND::<f64>::ones(&[2, 2]), 2, None).unwrap();
    let t3 = to_tt_tensor(&DenseND::<f64>::ones(&[2, 2, 2]), 2, None).unwrap();
    assert!(matches!(tt_tt_flat_inner(&t2, &t3), Err(TtError::ShapeError(_))));
}

#[test]
fn test_type_mismatch_and_unsupported() {
    let m = DenseND::<f64>::ones(&[4, 4]);
    let tm = to_tt_matrix(&m, MatrixShape::new(&[2, 2], &[2, 2]), 2, None).unwrap();
    let tt = to_tt_tensor(&m, 2, None).unwrap();

    assert!(matches!(tt_tt_matmul(&tt, &tm), Err(TtError::TypeMismatch(_))));
    assert!(matches!(tt_tt_flat_inner(&tt, &tm), Err(TtError::TypeMismatch(_))));

    assert!(matches!(
        matmul(Operand::from(&tm), Operand::from(&m)),
        Err(TtError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        flat_inner(Operand::from(&m), Operand::from(&tt)),
        Err(TtError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_f32_support() {
    let x = DenseND::<f32>::from_fn(&[3, 3, 3], |i| (1 + i[0]) as f32 * (2 + i[1] + i[2]) as f32);
    let tt = to_tt_tensor(&x, 3, None).unwrap();
    assert_eq!(tt.get_tt_ranks(), &[1, 1, 2, 1]);
    let y = full(&tt).unwrap();
    let err = x.max_abs_diff(&y).unwrap();
    assert!(err < 1e-3, "f32 error {}", err);

    // f32 round-off must not show up as extra rank
    let outer = DenseND::<f32>::from_fn(&[3, 4, 5, 2], |i| {
        (1.0 + i[0] as f32) * (0.5 + i[1] as f32) * (2.0 - 0.3 * i[2] as f32) * (1.0 + i[3] as f32)
    });
    let tt = to_tt_tensor(&outer, 10, None).unwrap();
    assert_eq!(tt.get_tt_ranks(), &[1, 1, 1, 1, 1]);
    assert!(tt.relative_error(&outer).unwrap() < 1e-5);

    let rounded = round(&tt, 10, None).unwrap();
    assert_eq!(rounded.get_tt_ranks(), &[1, 1, 1, 1, 1]);
}
