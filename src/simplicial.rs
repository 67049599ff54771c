//! Simplicial complexes from the clique dual of a hypergraph.
//!
//! The dual's conflict graph has one vertex per hyperedge and an edge
//! wherever two hyperedges share a node index. Its maximal cliques become
//! the maximal simplices of the complex; the complex stores the full
//! downward closure so every face of every simplex is present.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use dashmap::DashMap;
use log::{debug, info};
use rayon::prelude::*;

use crate::cliques::maximal_cliques;
use crate::hypergraph::Hypergraph;

/// A simplex over dual vertices (hyperedge ids).
pub type Simplex = BTreeSet<usize>;

/// Downward-closed collection of simplices keyed by dimension.
#[derive(Clone, Debug, Default)]
pub struct SimplicialComplex {
    simplices: HashMap<usize, HashSet<Simplex>>,
    max_dimension: usize,
}

impl SimplicialComplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The complex generated by `maximal`: every given simplex plus its
    /// downward closure under subsets.
    pub fn from_simplices<I: IntoIterator<Item = Simplex>>(maximal: I) -> Self {
        let mut complex = Self::new();
        for simplex in maximal {
            complex.add_simplex(simplex);
        }
        complex
    }

    /// Insert a simplex together with all of its faces.
    pub fn add_simplex(&mut self, simplex: Simplex) {
        if simplex.is_empty() {
            return;
        }
        let dim = simplex.len() - 1;
        let faces = boundary(&simplex);
        if !self.simplices.entry(dim).or_default().insert(simplex) {
            // already present, so its closure is too
            return;
        }
        self.max_dimension = self.max_dimension.max(dim);
        for face in faces {
            self.add_simplex(face);
        }
    }

    pub fn contains(&self, simplex: &Simplex) -> bool {
        !simplex.is_empty()
            && self
                .simplices
                .get(&(simplex.len() - 1))
                .is_some_and(|set| set.contains(simplex))
    }

    pub fn simplices_of_dim(&self, dim: usize) -> impl Iterator<Item = &Simplex> {
        self.simplices.get(&dim).into_iter().flatten()
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    /// Simplex count per dimension, for 0..=max_dimension.
    pub fn simplex_counts(&self) -> Vec<usize> {
        (0..=self.max_dimension)
            .map(|d| self.simplices.get(&d).map_or(0, HashSet::len))
            .collect()
    }

    pub fn total_simplices(&self) -> usize {
        self.simplices.values().map(HashSet::len).sum()
    }

    /// Euler characteristic Σ (−1)^d · |K_d|.
    pub fn euler_characteristic(&self) -> i64 {
        self.simplices
            .iter()
            .map(|(dim, set)| {
                let count = set.len() as i64;
                if dim % 2 == 0 {
                    count
                } else {
                    -count
                }
            })
            .sum()
    }
}

/// Codimension-one faces of a simplex.
fn boundary(simplex: &Simplex) -> Vec<Simplex> {
    if simplex.len() <= 1 {
        return Vec::new();
    }
    simplex
        .iter()
        .map(|skip| simplex.iter().filter(|v| *v != skip).copied().collect())
        .collect()
}

/// Build the simplicial complex of the clique dual of `hypergraph`.
///
/// Conflict-graph construction tests all hyperedge pairs, O(M²) in the
/// hyperedge count; pairs are checked in parallel and overlapping ones
/// accumulated lock-free.
pub fn clique_dual<V: Eq + Hash + Clone>(hypergraph: &Hypergraph<V>) -> SimplicialComplex {
    let m = hypergraph.hyperedge_count();
    let hyperedges = hypergraph.hyperedges();

    let overlaps: DashMap<(usize, usize), ()> = DashMap::new();
    (0..m).into_par_iter().for_each(|i| {
        for j in (i + 1)..m {
            if shares_node(&hyperedges[i], &hyperedges[j]) {
                overlaps.insert((i, j), ());
            }
        }
    });

    let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); m];
    for entry in overlaps.iter() {
        let (i, j) = *entry.key();
        adjacency[i].insert(j);
        adjacency[j].insert(i);
    }
    debug!(
        "conflict graph: {} hyperedges, {} overlapping pairs",
        m,
        overlaps.len()
    );

    let cliques = maximal_cliques(&adjacency);
    info!(
        "clique dual: {} maximal simplices over {} hyperedges",
        cliques.len(),
        m
    );
    SimplicialComplex::from_simplices(cliques)
}

/// Two sorted index sequences share an element iff a merge scan meets one.
fn shares_node(a: &[usize], b: &[usize]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => return true,
        }
    }
    false
}
