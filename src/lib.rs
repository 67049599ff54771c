//! # Lapwing
//!
//! Numerical routines for graph-theoretic research, in two independent
//! pieces:
//!
//! 1. **Spectral sparsification**: compress a weighted graph while
//!    approximately preserving its Laplacian quadratic form. Effective
//!    resistances are computed from the dense Moore–Penrose pseudoinverse of
//!    the Laplacian, edges are importance-sampled with a seeded RNG, and the
//!    surviving weights are reconstructed so the estimator is unbiased.
//! 2. **Hypergraph energy and diffusion**: a max-based hyperedge energy,
//!    its half-gradient Laplacian operator, iterated diffusion, and the
//!    clique-dual construction that turns a hypergraph into a simplicial
//!    complex.
//!
//! # Module Map
//!
//! - [`graph`]: weighted undirected graphs, incidence/weight/Laplacian
//!   matrices.
//! - [`laplacian`]: dense pseudoinverse and effective resistances.
//! - [`sparsification`]: the effective-resistance sparsifier.
//! - [`hypergraph`]: hypergraph model, energy, Laplacian operator, diffusion.
//! - [`cliques`]: maximal-clique enumeration (Bron–Kerbosch with pivoting).
//! - [`simplicial`]: simplicial complexes and the clique-dual builder.
//!
//! Every routine is a pure function of its inputs (plus an explicit RNG
//! seed); all computation is synchronous and in-memory. The dense n×n
//! pseudoinverse in the sparsifier is the intended scalability ceiling.
//!
//! # Usage
//!
//! ```ignore
//! use lapwing::{SpectralSparsifier, WeightedGraph};
//!
//! let graph = WeightedGraph::from_adjacency(&adj_rows)?;
//! let sparsifier = SpectralSparsifier::new(0.5).with_seed(0);
//! let sparse = sparsifier.sparsify(&graph)?;
//! assert!(sparse.edge_count() <= graph.edge_count());
//! ```

pub mod cliques;
pub mod error;
pub mod graph;
pub mod hypergraph;
pub mod laplacian;
pub mod simplicial;
pub mod sparsification;

pub use error::{Error, Result};
pub use graph::{Edge, WeightedGraph};
pub use hypergraph::Hypergraph;
pub use simplicial::{clique_dual, Simplex, SimplicialComplex};
pub use sparsification::SpectralSparsifier;

#[cfg(test)]
mod tests;
