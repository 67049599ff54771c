use approx::abs_diff_eq;
use log::debug;

use crate::error::Error;
use crate::graph::WeightedGraph;
use crate::tests::test_data::weighted_triangle;

#[test]
fn test_from_adjacency_dedups_symmetric_entries() {
    let adj_rows = vec![
        vec![(1, 1.0), (2, 0.5)],
        vec![(0, 1.0), (2, 0.8)],
        vec![(0, 0.5), (1, 0.8)],
    ];

    let graph = WeightedGraph::from_adjacency(&adj_rows).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert!(abs_diff_eq!(graph.total_weight(), 2.3, epsilon = 1e-12));
}

#[test]
fn test_from_adjacency_honours_one_sided_entries() {
    // Edge (2, 0) is listed only from node 2's side.
    let adj_rows = vec![vec![(1, 1.0)], vec![(0, 1.0)], vec![(0, 0.25)]];

    let graph = WeightedGraph::from_adjacency(&adj_rows).unwrap();

    assert_eq!(graph.edge_count(), 2);
    assert!(graph.edges().iter().any(|e| e.u == 0 && e.v == 2));
}

#[test]
fn test_add_edge_rejects_invalid_input() {
    let mut graph = WeightedGraph::new(3);

    assert!(matches!(
        graph.add_edge(1, 1, 1.0),
        Err(Error::InvalidGraph(_))
    ));
    assert!(matches!(
        graph.add_edge(0, 7, 1.0),
        Err(Error::InvalidGraph(_))
    ));
    assert!(matches!(
        graph.add_edge(0, 1, -0.5),
        Err(Error::InvalidGraph(_))
    ));
    assert!(matches!(
        graph.add_edge(0, 1, f64::NAN),
        Err(Error::InvalidGraph(_))
    ));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_edge_updates_and_removal() {
    let mut graph = WeightedGraph::new(3);
    graph.add_edge(0, 1, 1.0).unwrap();

    // add_edge upserts, regardless of endpoint order
    graph.add_edge(1, 0, 2.5).unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges()[0].weight, 2.5);

    graph.set_weight(0, 1, 3.0).unwrap();
    assert_eq!(graph.edges()[0].weight, 3.0);
    assert!(matches!(
        graph.set_weight(0, 2, 1.0),
        Err(Error::InvalidGraph(_))
    ));

    assert_eq!(graph.remove_edge(1, 0), Some(3.0));
    assert_eq!(graph.remove_edge(0, 1), None);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_incidence_matrix_structure() {
    let graph = weighted_triangle();
    let incidence = graph.incidence_matrix();

    assert_eq!(incidence.shape(), (3, 3));
    for (row, edge) in graph.edges().iter().enumerate() {
        assert_eq!(incidence.get(row, edge.u), Some(&1.0));
        assert_eq!(incidence.get(row, edge.v), Some(&-1.0));

        // each oriented row sums to zero
        let row_sum: f64 = incidence
            .outer_view(row)
            .unwrap()
            .iter()
            .map(|(_, &v)| v)
            .sum();
        assert!(abs_diff_eq!(row_sum, 0.0, epsilon = 1e-15));
    }
}

#[test]
fn test_weight_matrix_is_diagonal() {
    let graph = weighted_triangle();
    let weights = graph.weight_matrix();

    assert_eq!(weights.shape(), (3, 3));
    assert_eq!(weights.nnz(), 3);
    for (row, edge) in graph.edges().iter().enumerate() {
        assert_eq!(weights.get(row, row), Some(&edge.weight));
    }
}

#[test]
fn test_laplacian_equals_incidence_product() {
    crate::tests::init();
    let graph = weighted_triangle();
    let n = graph.node_count();
    let m = graph.edge_count();

    // Dense BᵗWB computed by hand from the incidence rows.
    let incidence = graph.incidence_matrix();
    let mut b = vec![vec![0.0; n]; m];
    for (row, vector) in incidence.outer_iterator().enumerate() {
        for (col, &val) in vector.iter() {
            b[row][col] = val;
        }
    }
    let weights: Vec<f64> = graph.edges().iter().map(|e| e.weight).collect();

    let laplacian = graph.laplacian();
    for i in 0..n {
        for j in 0..n {
            let expected: f64 = (0..m).map(|e| b[e][i] * weights[e] * b[e][j]).sum();
            let got = laplacian.get(i, j).copied().unwrap_or(0.0);
            assert!(
                abs_diff_eq!(got, expected, epsilon = 1e-12),
                "L[{i},{j}] = {got} should equal (BᵗWB)[{i},{j}] = {expected}"
            );
        }
    }
    debug!("Laplacian matches the incidence-matrix product");
}

#[test]
fn test_laplacian_mathematical_properties() {
    let graph = weighted_triangle();
    let laplacian = graph.laplacian();
    let n = graph.node_count();

    for (i, row) in laplacian.outer_iterator().enumerate() {
        // zero row sums
        let row_sum: f64 = row.iter().map(|(_, &v)| v).sum();
        assert!(
            abs_diff_eq!(row_sum, 0.0, epsilon = 1e-12),
            "row {i} sums to {row_sum:.2e}"
        );

        for (j, &value) in row.iter() {
            // symmetry
            let transposed = laplacian.get(j, i).copied().unwrap_or(0.0);
            assert!(abs_diff_eq!(value, transposed, epsilon = 1e-12));
            // off-diagonals are non-positive
            if i != j {
                assert!(value <= 0.0);
            }
        }
    }

    // diagonal carries the weighted degrees
    let degrees = graph.degrees();
    for i in 0..n {
        assert!(abs_diff_eq!(
            laplacian.get(i, i).copied().unwrap_or(0.0),
            degrees[i],
            epsilon = 1e-12
        ));
    }
}
