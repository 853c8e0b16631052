//! Tensor-Train walkthrough
//!
//! Compresses a smooth 6-way tensor, builds a TT-matrix for a 64×64
//! discrete Laplacian-like operator, multiplies it by itself, re-compresses
//! the product, and evaluates inner products against a sparse probe.
//!
//! Run with:
//! ```bash
//! cargo run --example tt_matrix
//! ```

use ttensor_core::DenseND;
use ttensor_sparse::CooTensor;
use ttensor_train::{
    frobenius_norm_default, full, round, to_tt_matrix, to_tt_tensor, tt_sparse_flat_inner,
    tt_tt_flat_inner, tt_tt_matmul, MatrixShape,
};

fn main() -> anyhow::Result<()> {
    println!("{}", "=".repeat(80));
    println!("Tensor-Train Example");
    println!("{}", "=".repeat(80));
    println!();

    // ========================================================================
    // Example 1: Compress a 6-way tensor
    // ========================================================================
    println!("Example 1: to_tt_tensor on a 6-way tensor");
    println!("{}", "-".repeat(80));

    let shape = vec![6; 6];
    let tensor = DenseND::<f64>::from_fn(&shape, |idx| {
        let t: f64 = idx.iter().map(|&i| i as f64).sum();
        1.0 / (1.0 + t)
    });

    for &eps in &[1e-2, 1e-4, 1e-8] {
        let start = std::time::Instant::now();
        let tt = to_tt_tensor(&tensor, 20, Some(eps))?;
        let elapsed = start.elapsed();
        println!("epsilon {:e}:", eps);
        println!("  - Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);
        println!("  - TT-ranks: {:?}", tt.get_tt_ranks());
        println!("  - Compression ratio: {:.2}x", tt.compression_ratio());
        println!("  - Relative error: {:.3e}", tt.relative_error(&tensor)?);
    }
    println!();

    // ========================================================================
    // Example 2: TT-matrix product and rounding
    // ========================================================================
    println!("Example 2: TT-matrix product");
    println!("{}", "-".repeat(80));

    let n = 64;
    let operator = DenseND::<f64>::from_fn(&[n, n], |idx| match idx[0].abs_diff(idx[1]) {
        0 => 2.0,
        1 => -1.0,
        _ => 0.0,
    });
    let modes = [2, 2, 2, 2, 2, 2];
    let tt_op = to_tt_matrix(&operator, MatrixShape::new(&modes, &modes), 10, None)?;
    println!("Operator TT-ranks: {:?}", tt_op.get_tt_ranks());
    println!(
        "Operator reconstruction error: {:.3e}",
        tt_op.relative_error(&operator)?
    );

    let squared = tt_tt_matmul(&tt_op, &tt_op)?;
    println!("Product TT-ranks: {:?}", squared.get_tt_ranks());
    let rounded = round(&squared, 10, Some(1e-10))?;
    println!("Rounded TT-ranks: {:?}", rounded.get_tt_ranks());

    let dense_product = full(&rounded)?;
    println!(
        "Row 10 of the squared operator: {:?}",
        (8..13).map(|j| dense_product[&[10, j][..]]).collect::<Vec<_>>()
    );
    println!();

    // ========================================================================
    // Example 3: Inner products and norms
    // ========================================================================
    println!("Example 3: Inner products");
    println!("{}", "-".repeat(80));

    println!("||A||_F (softened): {:.6}", frobenius_norm_default(&tt_op)?);
    println!("<A, A^2>: {:.6}", tt_tt_flat_inner(&tt_op, &squared)?);

    let probe = CooTensor::new(
        vec![vec![0, 0], vec![10, 11], vec![63, 63]],
        vec![1.0, 1.0, 1.0],
        vec![n, n],
    )?;
    println!(
        "A(0,0) + A(10,11) + A(63,63): {:.6}",
        tt_sparse_flat_inner(&tt_op, &probe)?
    );

    Ok(())
}
