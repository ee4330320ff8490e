use std::collections::{BTreeMap, HashMap, HashSet};

use process_graphs::prelude::*;
use proptest::prelude::any;
use proptest::proptest;
use proptest::sample::Index;

use super::strategy::{arb_biconnected, arb_ear_graph};

type Tree = TCTree<VertexId, EdgeId>;

fn unordered(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    (a.min(b), a.max(b))
}

fn pick_edge(g: &Graph, index: Index) -> EdgeId {
    EdgeId(index.index(g.edge_count()))
}

fn merged(g: &Graph, reference: EdgeId) -> Tree {
    let options = DecompositionOptions {
        merge_bonds_and_polygons: true,
    };
    TCTree::with_options(g, reference, options).unwrap()
}

// Each node as its type and sorted real edges, sorted.
fn components(tree: &Tree) -> Vec<(TCType, Vec<EdgeId>)> {
    let mut result: Vec<(TCType, Vec<EdgeId>)> = tree
        .nodes()
        .map(|(_, node)| {
            let mut real: Vec<EdgeId> = node.skeleton().real_edges().collect();
            real.sort();
            (node.kind(), real)
        })
        .collect();
    result.sort();
    result
}

// True if the skeleton stays connected once `a` and `b` are removed.
fn connected_without(
    skeleton: &Skeleton<VertexId, EdgeId>,
    vertices: &[VertexId],
    a: VertexId,
    b: VertexId,
) -> bool {
    let rest: Vec<VertexId> = vertices
        .iter()
        .copied()
        .filter(|&v| v != a && v != b)
        .collect();
    let Some(&start) = rest.first() else {
        return true;
    };

    let mut seen = HashSet::from([start]);
    let mut stack = vec![start];
    while let Some(v) = stack.pop() {
        for edge in skeleton.edges() {
            let w = if edge.source == v {
                edge.target
            } else if edge.target == v {
                edge.source
            } else {
                continue;
            };
            if w != a && w != b && seen.insert(w) {
                stack.push(w);
            }
        }
    }
    seen.len() == rest.len()
}

// Brute force: simple, and no pair of vertices disconnects it.
fn assert_triconnected(name: &str, skeleton: &Skeleton<VertexId, EdgeId>) {
    let mut pairs = HashSet::new();
    for edge in skeleton.edges() {
        assert_ne!(edge.source, edge.target, "{name} has a loop");
        assert!(
            pairs.insert(unordered(edge.source, edge.target)),
            "{name} has parallel edges"
        );
    }

    let vertices = skeleton.vertices();
    for (i, &a) in vertices.iter().enumerate() {
        for &b in &vertices[i + 1..] {
            assert!(
                connected_without(skeleton, &vertices, a, b),
                "{{{a:?}, {b:?}}} is a separation pair of {name}"
            );
        }
    }
}

fn virtual_owners(tree: &Tree) -> HashMap<VirtualEdgeId, Vec<TCNodeId>> {
    let mut owners: HashMap<VirtualEdgeId, Vec<TCNodeId>> = HashMap::new();
    for (id, node) in tree.nodes() {
        for v in node.skeleton().virtual_edges() {
            owners.entry(v).or_default().push(id);
        }
    }
    owners
}

// Node types agree with skeleton shapes.
fn assert_shapes(tree: &Tree) {
    for (_, node) in tree.nodes() {
        let skeleton = node.skeleton();
        let vertices = skeleton.vertices();
        assert!(skeleton.edge_count() >= 3, "{} is too small", node.name());
        match node.kind() {
            TCType::Bond => assert_eq!(vertices.len(), 2),
            TCType::Polygon => {
                assert!(vertices.len() >= 3);
                assert!(vertices.iter().all(|&v| skeleton.degree(v) == 2));
            }
            TCType::Rigid => {
                assert!(vertices.len() >= 4);
                assert!(vertices.iter().all(|&v| skeleton.degree(v) >= 3));
                assert_triconnected(node.name(), skeleton);
            }
        }
    }
}

// Every virtual edge has exactly one twin, in a neighbouring node, between the same vertices.
fn assert_virtual_pairs(tree: &Tree) {
    let owners = virtual_owners(tree);
    assert_eq!(owners.len() + 1, tree.len());

    for (id, nodes) in owners {
        assert_eq!(nodes.len(), 2, "{id:?} is not paired");
        let (a, b) = (nodes[0], nodes[1]);
        assert_ne!(a, b);
        assert!(tree.is_parent(a, b) || tree.is_parent(b, a));
        assert_eq!(tree.sibling(a, id), Some(b));

        let ends = |n: TCNodeId| {
            let (s, t) = tree.node(n).skeleton().virtual_endpoints(id).unwrap();
            unordered(s, t)
        };
        assert_eq!(ends(a), ends(b));
    }
}

// Real edges of all skeletons are the edges of the graph, each exactly once.
fn assert_real_edges(g: &Graph, tree: &Tree) {
    let mut seen: Vec<EdgeId> = tree.real_edges().collect();
    seen.sort();
    let expected: Vec<EdgeId> = g.edges().collect();
    assert_eq!(seen, expected);

    for (_, node) in tree.nodes() {
        for edge in node.skeleton().edges() {
            if let SkeletonEdgeKind::Real(e) = edge.kind {
                let (s, t) = g.endpoints(e);
                assert_eq!(unordered(edge.source, edge.target), unordered(s, t));
            }
        }
    }
}

fn assert_rooted_at_reference(tree: &Tree) {
    let reference = *tree.reference_edge().unwrap();
    let holders: Vec<TCNodeId> = tree
        .nodes()
        .filter(|(_, n)| n.skeleton().contains_real(reference))
        .map(|(id, _)| id)
        .collect();
    assert_eq!(holders, vec![tree.root().unwrap()]);
}

fn assert_decomposition(g: &Graph, tree: &Tree) {
    assert_shapes(tree);
    assert_virtual_pairs(tree);
    assert_real_edges(g, tree);
    assert_rooted_at_reference(tree);
}

fn assert_canonical(g: &Graph, tree: &Tree) {
    assert_decomposition(g, tree);

    // no bond next to a bond, no polygon next to a polygon
    for (id, node) in tree.nodes() {
        if let Some(parent) = tree.parent(id) {
            let kind = tree.node(parent).kind();
            assert!(kind == TCType::Rigid || kind != node.kind());
        }
    }
}

proptest! {
    #[test]
    fn test_split_components(g in arb_biconnected(9, 8), index in any::<Index>()) {
        let tree = TCTree::with_reference(&g, pick_edge(&g, index)).unwrap();
        assert_decomposition(&g, &tree);
    }

    #[test]
    fn test_triconnected_components(g in arb_biconnected(9, 8), index in any::<Index>()) {
        let tree = merged(&g, pick_edge(&g, index));
        assert_canonical(&g, &tree);
    }

    #[test]
    fn test_ear_graphs(g in arb_ear_graph(6, 3), index in any::<Index>()) {
        let reference = pick_edge(&g, index);
        let tree = TCTree::with_reference(&g, reference).unwrap();
        assert_decomposition(&g, &tree);
        assert_canonical(&g, &merged(&g, reference));
    }

    #[test]
    fn test_components_do_not_depend_on_reference(
        g in arb_ear_graph(5, 2),
        index in any::<Index>(),
    ) {
        let first = merged(&g, EdgeId(0));
        let other = merged(&g, pick_edge(&g, index));
        assert_eq!(components(&first), components(&other));
    }

    #[test]
    fn test_parallel_edges_form_one_bond(g in arb_biconnected(8, 8)) {
        let tree = TCTree::new(&g).unwrap();

        let mut parallel: BTreeMap<(VertexId, VertexId), Vec<EdgeId>> = BTreeMap::new();
        for e in g.edges() {
            let (s, t) = g.endpoints(e);
            parallel.entry(unordered(s, t)).or_default().push(e);
        }

        for run in parallel.values().filter(|run| run.len() >= 2) {
            let (_, bond) = tree
                .nodes()
                .find(|(_, n)| n.skeleton().contains_real(run[0]))
                .unwrap();
            assert_eq!(bond.kind(), TCType::Bond);
            assert_eq!(bond.skeleton().real_edges().collect::<Vec<_>>(), *run);
            assert_eq!(bond.skeleton().virtual_edges().count(), 1);
        }
    }

    #[test]
    fn test_reroot_anywhere(g in arb_ear_graph(4, 2)) {
        let tree = merged(&g, EdgeId(0));
        for (id, _) in tree.nodes() {
            let mut rerooted = tree.clone();
            assert_eq!(rerooted.reroot(id), Some(id));
            assert!(rerooted.is_root(id));
            assert_eq!(rerooted.parent(id), None);
            assert_eq!(rerooted.preorder().len(), tree.len());
            for (other, _) in tree.nodes().filter(|&(other, _)| other != id) {
                assert!(rerooted.is_ancestor(id, other));
                assert_eq!(rerooted.lca(id, other), id);
            }
        }
    }
}
