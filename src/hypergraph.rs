//! Hypergraph energy model and diffusion.
//!
//! The energy of a signal x is Σ over hyperedges of the maximum pairwise
//! squared difference within the hyperedge, divided by the hyperedge
//! cardinality. The Laplacian operator is half the (sub)gradient of that
//! energy, and diffusion iterates x ← x − L(x).

use std::collections::HashMap;
use std::hash::Hash;

use log::{debug, trace};

use crate::error::{Error, Result};

/// A hypergraph over arbitrary hashable node labels.
///
/// Labels are remapped to dense indices 0..N in first-seen order at
/// construction; the mapping and the per-hyperedge index buffers are
/// immutable afterwards and shared by every energy/diffusion call.
#[derive(Clone, Debug)]
pub struct Hypergraph<V: Eq + Hash + Clone> {
    node_map: HashMap<V, usize>,
    hyperedges: Vec<Vec<usize>>,
}

impl<V: Eq + Hash + Clone> Hypergraph<V> {
    /// Build a hypergraph from a sequence of hyperedges.
    ///
    /// Each hyperedge is stored as a sorted vector of node indices. Empty
    /// hyperedges are rejected: their zero cardinality would divide the
    /// energy term by zero.
    pub fn new<I, E>(hyperedges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: IntoIterator<Item = V>,
    {
        let mut node_map: HashMap<V, usize> = HashMap::new();
        let mut edges = Vec::new();
        for (pos, hyperedge) in hyperedges.into_iter().enumerate() {
            let mut indices: Vec<usize> = hyperedge
                .into_iter()
                .map(|label| {
                    let next = node_map.len();
                    *node_map.entry(label).or_insert(next)
                })
                .collect();
            if indices.is_empty() {
                return Err(Error::InvalidHyperedge(pos));
            }
            indices.sort_unstable();
            edges.push(indices);
        }
        debug!(
            "hypergraph built: {} nodes, {} hyperedges",
            node_map.len(),
            edges.len()
        );
        Ok(Self {
            node_map,
            hyperedges: edges,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_map.len()
    }

    pub fn hyperedge_count(&self) -> usize {
        self.hyperedges.len()
    }

    /// Hyperedges as sorted node-index vectors, in construction order.
    pub fn hyperedges(&self) -> &[Vec<usize>] {
        &self.hyperedges
    }

    /// Dense index assigned to `label`, if the label occurs in any hyperedge.
    pub fn node_index(&self, label: &V) -> Option<usize> {
        self.node_map.get(label).copied()
    }

    fn check_signal(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.node_count() {
            return Err(Error::DimensionMismatch {
                expected: self.node_count(),
                got: x.len(),
            });
        }
        Ok(())
    }

    /// The pair maximizing (x_i − x_j)² within a hyperedge is always
    /// (argmax, argmin) of x, so each hyperedge reduces to its extremes.
    /// Ties resolve to the lowest index.
    fn extremes(&self, hyperedge: &[usize], x: &[f64]) -> (usize, usize) {
        let mut hi = hyperedge[0];
        let mut lo = hyperedge[0];
        for &i in &hyperedge[1..] {
            if x[i] > x[hi] {
                hi = i;
            }
            if x[i] < x[lo] {
                lo = i;
            }
        }
        (hi, lo)
    }

    /// Energy of the signal x on the hypergraph.
    pub fn energy(&self, x: &[f64]) -> Result<f64> {
        self.check_signal(x)?;
        let mut energy = 0.0;
        for hyperedge in &self.hyperedges {
            let (hi, lo) = self.extremes(hyperedge, x);
            let spread = x[hi] - x[lo];
            energy += spread * spread / hyperedge.len() as f64;
        }
        Ok(energy)
    }

    /// Laplacian operator: half the gradient of `energy` at x.
    ///
    /// The energy is non-smooth where the maximizing pair changes; at those
    /// points this returns the subgradient at the lowest-index extremes.
    pub fn laplacian(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.check_signal(x)?;
        let mut grad = vec![0.0; x.len()];
        for hyperedge in &self.hyperedges {
            let (hi, lo) = self.extremes(hyperedge, x);
            let pull = (x[hi] - x[lo]) / hyperedge.len() as f64;
            grad[hi] += pull;
            grad[lo] -= pull;
        }
        Ok(grad)
    }

    /// Apply k sequential diffusion steps x ← x − L(x).
    ///
    /// Each step depends on the previous one; k = 0 returns x unchanged.
    pub fn diffuse(&self, x: &[f64], k: usize) -> Result<Vec<f64>> {
        self.check_signal(x)?;
        let mut state = x.to_vec();
        for step in 0..k {
            let lap = self.laplacian(&state)?;
            for (s, l) in state.iter_mut().zip(&lap) {
                *s -= l;
            }
            trace!("diffusion step {} of {k} complete", step + 1);
        }
        Ok(state)
    }
}
