use process_graphs::prelude::*;

type Tree = TCTree<VertexId, EdgeId>;

fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::from_edges(n, edges).unwrap()
}

fn merged(g: &Graph, reference: usize) -> Tree {
    let options = DecompositionOptions {
        merge_bonds_and_polygons: true,
    };
    TCTree::with_options(g, EdgeId(reference), options).unwrap()
}

fn kinds(tree: &Tree) -> (usize, usize, usize) {
    (
        tree.nodes_of_type(TCType::Bond).len(),
        tree.nodes_of_type(TCType::Polygon).len(),
        tree.nodes_of_type(TCType::Rigid).len(),
    )
}

#[test]
fn test_empty_graph() {
    let tree = TCTree::new(&Graph::discrete(3)).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(tree.reference_edge(), None);
}

#[test]
fn test_bond() {
    let g = graph(2, &[(0, 1), (0, 1), (1, 0)]);
    let tree = TCTree::with_reference(&g, EdgeId(2)).unwrap();
    assert_eq!(kinds(&tree), (1, 0, 0));
    let root = tree.root().unwrap();
    assert_eq!(tree.node(root).name(), "B0");
    assert_eq!(tree.node(root).skeleton().edge_count(), 3);
    assert_eq!(tree.reference_edge(), Some(&EdgeId(2)));
    assert_eq!(tree.graph_root(), Some(&VertexId(1)));
}

#[test]
fn test_k4_is_rigid() {
    let g = graph(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    let tree = TCTree::new(&g).unwrap();
    assert_eq!(kinds(&tree), (0, 0, 1));
    let root = tree.root().unwrap();
    assert_eq!(tree.node(root).name(), "R0");
    assert_eq!(tree.node(root).skeleton().virtual_edges().count(), 0);
    assert!(tree.children(root).is_empty());
}

#[test]
fn test_wheel_is_rigid() {
    // hub 0, rim 1..=5
    let mut edges = vec![];
    for i in 1..=5 {
        edges.push((0, i));
        edges.push((i, i % 5 + 1));
    }
    let g = graph(6, &edges);
    let tree = TCTree::new(&g).unwrap();
    assert_eq!(kinds(&tree), (0, 0, 1));
    assert_eq!(tree.node(TCNodeId(0)).skeleton().edge_count(), 10);
}

#[test]
fn test_square_with_chord() {
    let g = graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
    let tree = TCTree::new(&g).unwrap();
    assert_eq!(kinds(&tree), (1, 2, 0));

    let root = tree.root().unwrap();
    let bond = tree.nodes_of_type(TCType::Bond)[0];
    let leaf = tree
        .nodes_of_type(TCType::Polygon)
        .into_iter()
        .find(|&p| p != root)
        .unwrap();

    assert_eq!(tree.node(root).kind(), TCType::Polygon);
    assert!(tree.is_parent(root, bond));
    assert!(tree.is_child(leaf, bond));
    assert!(tree.is_ancestor(root, leaf));
    assert!(tree.is_descendant(leaf, root));
    assert_eq!(tree.lca(leaf, bond), bond);

    // the chord lives in the bond, between the two polygons
    assert!(tree.node(bond).skeleton().contains_real(EdgeId(4)));
    assert_eq!(tree.node(bond).skeleton().virtual_edges().count(), 2);
}

#[test]
fn test_rigid_with_polygon() {
    // K4 on 0..=3 with the edge 0-1 subdivided by 4
    let g = graph(5, &[(0, 4), (4, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    let tree = TCTree::new(&g).unwrap();
    assert_eq!(kinds(&tree), (0, 1, 1));

    let root = tree.root().unwrap();
    assert_eq!(tree.node(root).kind(), TCType::Polygon);
    assert_eq!(tree.node(root).skeleton().edge_count(), 3);

    let rigid = tree.nodes_of_type(TCType::Rigid)[0];
    assert_eq!(tree.parent(rigid), Some(root));
    let skeleton = tree.node(rigid).skeleton();
    assert_eq!(skeleton.vertex_count(), 4);
    assert_eq!(skeleton.real_edges().count(), 5);
    assert_eq!(
        skeleton.edges_between(VertexId(0), VertexId(1)).len(),
        1
    );
}

#[test]
fn test_theta_graph() {
    // three paths of length two between 0 and 1
    let g = graph(5, &[(0, 2), (2, 1), (0, 3), (3, 1), (0, 4), (4, 1)]);
    let tree = merged(&g, 0);
    assert_eq!(kinds(&tree), (1, 3, 0));

    let bond = tree.nodes_of_type(TCType::Bond)[0];
    let skeleton = tree.node(bond).skeleton();
    assert_eq!(skeleton.real_edges().count(), 0);
    assert_eq!(skeleton.virtual_edges().count(), 3);

    let root = tree.root().unwrap();
    assert!(tree.node(root).skeleton().contains_real(EdgeId(0)));
    assert_eq!(tree.children(bond).len(), 2);
}

#[test]
fn test_nested_polygons() {
    // a hexagon with a long diagonal
    let g = graph(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (0, 3)]);
    let tree = merged(&g, 0);
    assert_eq!(kinds(&tree), (1, 2, 0));
    for p in tree.nodes_of_type(TCType::Polygon) {
        assert_eq!(tree.node(p).skeleton().edge_count(), 4);
    }

    let bond = tree.nodes_of_type(TCType::Bond)[0];
    assert_eq!(
        tree.node(bond).skeleton().real_edges().collect::<Vec<_>>(),
        vec![EdgeId(6)]
    );
}

#[test]
fn test_long_cycle() {
    let n = 100_000;
    let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    let g = graph(n, &edges);

    let tree = merged(&g, 0);
    assert_eq!(tree.len(), 1);
    let root = tree.node(tree.root().unwrap());
    assert_eq!(root.kind(), TCType::Polygon);
    assert_eq!(root.skeleton().edge_count(), n);
    assert_eq!(root.skeleton().virtual_edges().count(), 0);

    let tree = TCTree::with_reference(&g, EdgeId(n / 2)).unwrap();
    assert_eq!(tree.real_edges().count(), n);
    assert_eq!(kinds(&tree).2, 0);
}

#[test]
fn test_reroot() {
    let g = graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
    let mut tree = TCTree::new(&g).unwrap();
    let old_root = tree.root().unwrap();
    let bond = tree.nodes_of_type(TCType::Bond)[0];

    assert_eq!(tree.reroot(bond), Some(bond));
    assert!(tree.is_root(bond));
    assert_eq!(tree.parent(old_root), Some(bond));
    assert_eq!(tree.children(bond).len(), 2);

    // rerooting at a node that does not exist changes nothing
    assert_eq!(tree.reroot(TCNodeId(42)), Some(bond));
}

#[test]
fn test_errors() {
    let g = graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
    assert_eq!(TCTree::new(&g), Err(DecompositionError::NotBiconnected));

    // two triangles sharing vertex 0
    let bowtie = graph(5, &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]);
    assert_eq!(TCTree::new(&bowtie), Err(DecompositionError::NotBiconnected));

    let disconnected = graph(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
    assert_eq!(
        TCTree::new(&disconnected),
        Err(DecompositionError::NotBiconnected)
    );

    let triangle = graph(3, &[(0, 1), (1, 2), (2, 0)]);
    let err = TCTree::with_reference(&triangle, EdgeId(3)).unwrap_err();
    assert_eq!(err.to_string(), "reference edge is not an edge of the graph");
}
