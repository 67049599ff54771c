//! Maximal-clique enumeration over a finite simple graph.
//!
//! Bron–Kerbosch with pivoting. The input is the graph's adjacency-set
//! representation; the output covers every vertex, since an isolated vertex
//! is itself a maximal (singleton) clique.

use std::collections::{BTreeSet, HashSet};

/// All maximal cliques of the simple graph `adjacency[v] = neighbours of v`.
pub fn maximal_cliques(adjacency: &[HashSet<usize>]) -> Vec<BTreeSet<usize>> {
    let mut cliques = Vec::new();
    let candidates: HashSet<usize> = (0..adjacency.len()).collect();
    bron_kerbosch(
        adjacency,
        BTreeSet::new(),
        candidates,
        HashSet::new(),
        &mut cliques,
    );
    cliques
}

fn bron_kerbosch(
    adjacency: &[HashSet<usize>],
    r: BTreeSet<usize>,
    mut p: HashSet<usize>,
    mut x: HashSet<usize>,
    out: &mut Vec<BTreeSet<usize>>,
) {
    if p.is_empty() && x.is_empty() {
        if !r.is_empty() {
            out.push(r);
        }
        return;
    }

    // Branch only on non-neighbours of the pivot; its neighbours are reached
    // through the recursive calls.
    let pivot = p.iter().chain(x.iter()).next().copied();
    if let Some(pivot) = pivot {
        let branches: Vec<usize> = p.difference(&adjacency[pivot]).copied().collect();
        for v in branches {
            let neighbours = &adjacency[v];
            let mut next_r = r.clone();
            next_r.insert(v);
            let next_p = p.intersection(neighbours).copied().collect();
            let next_x = x.intersection(neighbours).copied().collect();
            bron_kerbosch(adjacency, next_r, next_p, next_x, out);
            p.remove(&v);
            x.insert(v);
        }
    }
}
