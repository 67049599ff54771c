//! Effective-resistance spectral sparsification.
//!
//! Produces a reweighted subgraph H of the input G such that, with high
//! probability, (1−eps)·L_G ⪯ L_H ⪯ (1+eps)·L_G in the PSD order. Edges are
//! drawn with replacement proportionally to weight × effective resistance,
//! and each surviving edge's weight is reconstructed from its sampling
//! multiplicity so the estimator stays unbiased.
//!
//! The dense pseudoinverse behind the resistances caps the usable node
//! count; the sampler itself is linear in the draw budget.

use log::{debug, info};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::WeightedGraph;
use crate::laplacian::{effective_resistances, pseudoinverse};

/// Spectral sparsifier configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectralSparsifier {
    /// Relative Laplacian approximation error, in (0, 1).
    pub eps: f64,
    /// Reconstructed weights at or below this value are dropped.
    pub zero_threshold: f64,
    /// Oversampling constant c in the q = ⌈9·c²·n·ln(n)/eps²⌉ draw budget.
    /// Larger values tighten concentration at the cost of more samples.
    pub sampling_constant: f64,
    /// RNG seed; repeated runs with identical inputs are bit-identical.
    pub seed: u64,
}

impl SpectralSparsifier {
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            zero_threshold: 0.0,
            sampling_constant: 1.0,
            seed: 0,
        }
    }

    pub fn with_zero_threshold(mut self, zero_threshold: f64) -> Self {
        self.zero_threshold = zero_threshold;
        self
    }

    pub fn with_sampling_constant(mut self, sampling_constant: f64) -> Self {
        self.sampling_constant = sampling_constant;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of with-replacement draws for a graph on `nnodes` nodes.
    pub fn sample_budget(&self, nnodes: usize) -> usize {
        let n = nnodes as f64;
        (9.0 * self.sampling_constant.powi(2) * n * n.ln() / self.eps.powi(2)).ceil() as usize
    }

    /// Sparsify `graph`, returning a new graph over the same node set.
    pub fn sparsify(&self, graph: &WeightedGraph) -> Result<WeightedGraph> {
        if !(self.eps > 0.0 && self.eps < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "eps must lie in (0, 1), got {}",
                self.eps
            )));
        }
        if self.zero_threshold < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "zero_threshold must be non-negative, got {}",
                self.zero_threshold
            )));
        }
        let n = graph.node_count();
        let m = graph.edge_count();
        if m == 0 {
            return Err(Error::InvalidGraph("graph has no edges".into()));
        }
        if n < 2 {
            return Err(Error::InvalidGraph(format!(
                "graph needs at least two nodes, got {n}"
            )));
        }
        debug!("sparsifying: {} nodes, {} edges, eps={}", n, m, self.eps);

        let pinv = pseudoinverse(&graph.laplacian())?;
        let resistances = effective_resistances(graph, &pinv);

        // Spectral importance of an edge is weight × effective resistance;
        // normalized it is the sampling distribution.
        let importance: Vec<f64> = graph
            .edges()
            .iter()
            .zip(&resistances)
            .map(|(e, &r)| e.weight * r)
            .collect();
        let total: f64 = importance.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(Error::InvalidGraph(format!(
                "degenerate sampling distribution: total importance {total}"
            )));
        }
        let probs: Vec<f64> = importance.iter().map(|w| w / total).collect();

        let q = self.sample_budget(n);
        info!("sampled {:.1} times the number of edges", q as f64 / m as f64);

        let dist = WeightedIndex::new(&probs)
            .map_err(|e| Error::InvalidGraph(format!("sampling distribution rejected: {e}")))?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut multiplicities = vec![0usize; m];
        for _ in 0..q {
            multiplicities[dist.sample(&mut rng)] += 1;
        }

        let mut sparsified = WeightedGraph::new(n);
        let mut removed = 0usize;
        for ((edge, &k), &p) in graph.edges().iter().zip(&multiplicities).zip(&probs) {
            // A probability that underflowed to (sub)normal zero cannot be
            // divided through; such an edge gets weight zero, never NaN.
            if k == 0 || !p.is_normal() {
                removed += 1;
                continue;
            }
            let weight = edge.weight * k as f64 / (p * q as f64);
            if weight <= self.zero_threshold {
                removed += 1;
                continue;
            }
            sparsified.add_edge(edge.u, edge.v, weight)?;
        }
        info!("removed {} of {} edges below the zero threshold", removed, m);

        Ok(sparsified)
    }
}

impl Default for SpectralSparsifier {
    fn default() -> Self {
        Self::new(0.5)
    }
}
