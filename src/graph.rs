//! Weighted undirected graphs and their matrix representations.
//!
//! `WeightedGraph` is the shared substrate for the sparsifier: an ordered
//! node set 0..n and an edge list whose order fixes the row order of the
//! incidence and weight matrices. The Laplacian is assembled in sparse
//! triplet form from degrees and adjacency; it coincides with BᵗWB for the
//! oriented incidence matrix B and diagonal weight matrix W.

use log::{debug, trace};
use sprs::{CsMat, TriMat};

use crate::error::{Error, Result};

/// An undirected edge with a non-negative weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: f64,
}

/// A weighted undirected graph over nodes 0..n.
#[derive(Clone, Debug, Default)]
pub struct WeightedGraph {
    nnodes: usize,
    edges: Vec<Edge>,
}

impl WeightedGraph {
    pub fn new(nnodes: usize) -> Self {
        Self {
            nnodes,
            edges: Vec::new(),
        }
    }

    /// Build from adjacency rows `adj_rows[u] = [(v, weight), ...]`.
    ///
    /// Symmetric entries are collapsed so each undirected edge appears once,
    /// keyed by its (min, max) endpoints; a one-sided entry is honoured too.
    pub fn from_adjacency(adj_rows: &[Vec<(usize, f64)>]) -> Result<Self> {
        let mut graph = Self::new(adj_rows.len());
        for (u, neighbors) in adj_rows.iter().enumerate() {
            for &(v, weight) in neighbors {
                if u < v {
                    graph.add_edge(u, v, weight)?;
                } else if u > v && adj_rows[v].iter().all(|&(back, _)| back != u) {
                    graph.add_edge(v, u, weight)?;
                }
            }
        }
        debug!(
            "graph from adjacency: {} nodes, {} edges",
            graph.nnodes,
            graph.edges.len()
        );
        Ok(graph)
    }

    /// Insert an edge, or overwrite its weight if the edge already exists.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<()> {
        if u == v {
            return Err(Error::InvalidGraph(format!("self-loop at node {u}")));
        }
        if u >= self.nnodes || v >= self.nnodes {
            return Err(Error::InvalidGraph(format!(
                "edge ({u}, {v}) outside node range 0..{}",
                self.nnodes
            )));
        }
        if !(weight >= 0.0 && weight.is_finite()) {
            return Err(Error::InvalidGraph(format!(
                "edge ({u}, {v}) has invalid weight {weight}"
            )));
        }
        let (u, v) = if u < v { (u, v) } else { (v, u) };
        match self.edges.iter_mut().find(|e| e.u == u && e.v == v) {
            Some(edge) => edge.weight = weight,
            None => {
                trace!("adding edge ({u}, {v}) with weight {weight}");
                self.edges.push(Edge { u, v, weight });
            }
        }
        Ok(())
    }

    /// Overwrite the weight of an existing edge; errors if the edge is absent.
    pub fn set_weight(&mut self, u: usize, v: usize, weight: f64) -> Result<()> {
        let (u, v) = if u < v { (u, v) } else { (v, u) };
        if !self.edges.iter().any(|e| e.u == u && e.v == v) {
            return Err(Error::InvalidGraph(format!("no edge ({u}, {v}) to update")));
        }
        self.add_edge(u, v, weight)
    }

    /// Remove an edge, returning its weight if it was present.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> Option<f64> {
        let (u, v) = if u < v { (u, v) } else { (v, u) };
        let pos = self.edges.iter().position(|e| e.u == u && e.v == v)?;
        Some(self.edges.remove(pos).weight)
    }

    pub fn node_count(&self) -> usize {
        self.nnodes
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Weighted degree of every node.
    pub fn degrees(&self) -> Vec<f64> {
        let mut degrees = vec![0.0; self.nnodes];
        for e in &self.edges {
            degrees[e.u] += e.weight;
            degrees[e.v] += e.weight;
        }
        degrees
    }

    /// Oriented incidence matrix B (m×n): row e carries +1 at the smaller
    /// endpoint and -1 at the larger. The orientation is arbitrary but fixed.
    pub fn incidence_matrix(&self) -> CsMat<f64> {
        let mut triplets = TriMat::new((self.edges.len(), self.nnodes));
        for (row, e) in self.edges.iter().enumerate() {
            triplets.add_triplet(row, e.u, 1.0);
            triplets.add_triplet(row, e.v, -1.0);
        }
        triplets.to_csr()
    }

    /// Diagonal weight matrix W (m×m), row order matching `incidence_matrix`.
    pub fn weight_matrix(&self) -> CsMat<f64> {
        let mut triplets = TriMat::new((self.edges.len(), self.edges.len()));
        for (row, e) in self.edges.iter().enumerate() {
            triplets.add_triplet(row, row, e.weight);
        }
        triplets.to_csr()
    }

    /// Graph Laplacian L = BᵗWB (n×n, symmetric PSD).
    pub fn laplacian(&self) -> CsMat<f64> {
        let degrees = self.degrees();
        let mut triplets = TriMat::new((self.nnodes, self.nnodes));
        for (i, &degree) in degrees.iter().enumerate() {
            if degree != 0.0 {
                triplets.add_triplet(i, i, degree);
            }
        }
        for e in &self.edges {
            if e.weight != 0.0 {
                triplets.add_triplet(e.u, e.v, -e.weight);
                triplets.add_triplet(e.v, e.u, -e.weight);
            }
        }
        let laplacian = triplets.to_csr();
        debug!(
            "Laplacian assembled: {}×{} with {} non-zeros",
            self.nnodes,
            self.nnodes,
            laplacian.nnz()
        );
        laplacian
    }
}
