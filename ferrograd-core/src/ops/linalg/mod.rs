pub mod affine;
pub mod matmul;

pub use affine::affine_op;
pub use matmul::matmul_op;

/// Naive row-major matrix product: `a` is `[m, k]`, `b` is `[k, n]`.
pub(crate) fn matmul_raw(a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; m * n];
    for i in 0..m {
        for l in 0..k {
            let av = a[i * k + l];
            if av == 0.0 {
                continue;
            }
            for j in 0..n {
                out[i * n + j] += av * b[l * n + j];
            }
        }
    }
    out
}

/// Transpose of a row-major `[rows, cols]` buffer.
pub(crate) fn transpose_raw(a: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = a[r * cols + c];
        }
    }
    out
}
