use process_graphs::graph::Graph;

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::Index;
use proptest::strategy::{BoxedStrategy, Strategy};

/// A chord between two distinct vertices of `{0..n}`.
fn arb_chord(n: usize) -> BoxedStrategy<(usize, usize)> {
    (0..n, 1..n)
        .prop_map(move |(a, offset)| (a, (a + offset) % n))
        .boxed()
}

/// Biconnected multigraphs: a Hamiltonian cycle on `3..=max_vertices` vertices plus up to
/// `max_chords` extra edges. Chords may duplicate cycle edges or each other.
pub fn arb_biconnected(max_vertices: usize, max_chords: usize) -> BoxedStrategy<Graph> {
    assert!(max_vertices >= 3, "a cycle needs at least three vertices");

    (3..=max_vertices)
        .prop_flat_map(move |n| (Just(n), vec(arb_chord(n), 0..=max_chords)))
        .prop_map(|(n, chords)| {
            let mut edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
            edges.extend(chords);
            Graph::from_edges(n, &edges).unwrap()
        })
        .boxed()
}

/// Biconnected multigraphs grown by an open ear decomposition: a cycle on `3..=6` vertices, then
/// up to `max_ears` paths between two distinct existing vertices, each through at most
/// `max_ear_len` new vertices. An ear without new vertices is a chord or a parallel edge.
///
/// Unlike [`arb_biconnected`], this reaches graphs without a Hamiltonian cycle, such as theta
/// graphs and `K(2, n)`.
pub fn arb_ear_graph(max_ears: usize, max_ear_len: usize) -> BoxedStrategy<Graph> {
    let ear = (any::<Index>(), any::<Index>(), 0..=max_ear_len);
    (3..=6usize, vec(ear, 0..=max_ears))
        .prop_map(|(n, ears)| {
            let mut edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
            let mut count = n;
            for (a, b, len) in ears {
                let a = a.index(count);
                let b = b.index(count - 1);
                let b = if b >= a { b + 1 } else { b };

                let mut last = a;
                for _ in 0..len {
                    edges.push((last, count));
                    last = count;
                    count += 1;
                }
                edges.push((last, b));
            }
            Graph::from_edges(count, &edges).unwrap()
        })
        .boxed()
}
