//! Dense pseudoinverse and effective resistances.
//!
//! The Laplacian of a connected graph is singular (the all-ones vector spans
//! its null space), so the sparsifier works with the Moore–Penrose
//! pseudoinverse instead: eigendecompose the dense symmetric matrix, invert
//! the spectrum above a relative cutoff, and rebuild. The n×n dense
//! decomposition is the memory and runtime ceiling of the whole pipeline.

use log::{debug, trace};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linalg::traits::evd::EVDDecomposable;
use sprs::CsMat;

use crate::error::{Error, Result};
use crate::graph::WeightedGraph;

/// Densify a sparse symmetric matrix into row-major storage.
fn to_dense(matrix: &CsMat<f64>) -> Result<DenseMatrix<f64>> {
    let (n, _) = matrix.shape();
    trace!("densifying {}×{} matrix ({} non-zeros)", n, n, matrix.nnz());
    let mut flat = vec![0.0; n * n];
    for (&val, (row, col)) in matrix.iter() {
        flat[row * n + col] = val;
    }
    DenseMatrix::new(n, n, flat, false).map_err(|e| Error::Linalg(e.to_string()))
}

/// Moore–Penrose pseudoinverse of a symmetric PSD matrix.
///
/// L⁺ = V·diag(1/λᵢ)·Vᵗ over the eigenvalues above `n·ε·λ_max`; everything
/// at or below the cutoff is treated as the null space.
pub fn pseudoinverse(matrix: &CsMat<f64>) -> Result<DenseMatrix<f64>> {
    let (n, ncols) = matrix.shape();
    if n == 0 || n != ncols {
        return Err(Error::InvalidGraph(format!(
            "pseudoinverse requires a non-empty square matrix, got {n}×{ncols}"
        )));
    }

    let evd = to_dense(matrix)?
        .evd(true)
        .map_err(|e| Error::Linalg(e.to_string()))?;

    let lambda_max = evd.d.iter().cloned().fold(0.0f64, f64::max);
    if lambda_max <= 0.0 {
        return Err(Error::InvalidGraph(
            "matrix has no positive spectrum; all nodes are isolated".into(),
        ));
    }
    let cutoff = lambda_max * n as f64 * f64::EPSILON;
    let inv_spectrum: Vec<f64> = evd
        .d
        .iter()
        .map(|&lambda| if lambda > cutoff { 1.0 / lambda } else { 0.0 })
        .collect();
    debug!(
        "pseudoinverse: {} of {} eigenvalues above cutoff {:.3e}",
        inv_spectrum.iter().filter(|&&v| v != 0.0).count(),
        n,
        cutoff
    );

    // Eigenvectors sit in the columns of V.
    let v = &evd.V;
    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .map(|j| {
                    (0..n)
                        .map(|k| *v.get((i, k)) * inv_spectrum[k] * *v.get((j, k)))
                        .sum()
                })
                .collect()
        })
        .collect();

    DenseMatrix::from_2d_vec(&rows).map_err(|e| Error::Linalg(e.to_string()))
}

/// Per-edge effective resistances diag(B·L⁺·Bᵗ).
///
/// Row e of B is ±1 on the endpoints of edge (u, v), so the quadratic form
/// collapses to L⁺[u,u] + L⁺[v,v] − 2·L⁺[u,v].
pub fn effective_resistances(graph: &WeightedGraph, pinv: &DenseMatrix<f64>) -> Vec<f64> {
    graph
        .edges()
        .par_iter()
        .map(|e| {
            let r = *pinv.get((e.u, e.u)) + *pinv.get((e.v, e.v)) - 2.0 * *pinv.get((e.u, e.v));
            // negative values here are numeric dust
            r.max(0.0)
        })
        .collect()
}
