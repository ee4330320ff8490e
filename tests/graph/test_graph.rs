use process_graphs::graph::*;

#[test]
fn test_incidence_simple_example() {
    // 0 = 1 - 2, with a doubled edge between 0 and 1
    let mut g = Graph::discrete(2);
    let a = g.new_edge(VertexId(0), VertexId(1));
    let b = g.new_edge(VertexId(1), VertexId(0));
    let v = g.new_vertex();
    let c = g.new_edge(VertexId(1), v);

    assert_eq!(g.vertex_count(), 3);
    assert_eq!(g.edges_between(VertexId(0), VertexId(1)), vec![a, b]);
    assert_eq!(g.edges_between(VertexId(1), VertexId(0)), vec![a, b]);
    assert_eq!(
        g.incident_edges(VertexId(1)).collect::<Vec<_>>(),
        vec![a, b, c]
    );
    assert_eq!(g.endpoints(c), (VertexId(1), VertexId(2)));
    assert_eq!(g.degree(VertexId(2)), 1);
}

#[test]
fn test_self_loop_is_incident_once() {
    let mut g = Graph::discrete(2);
    let e = g.new_edge(VertexId(0), VertexId(0));
    assert_eq!(g.incident_edges(VertexId(0)).collect::<Vec<_>>(), vec![e]);
    // both ends of the loop count towards the degree
    assert_eq!(g.degree(VertexId(0)), 2);
    let f = g.new_edge(VertexId(0), VertexId(1));
    assert_eq!(g.degree(VertexId(0)), 3);
    assert_eq!(g.degree(VertexId(1)), 1);
    assert!(g.contains_edge(e));
    assert!(g.contains_edge(f));
    assert!(!g.contains_edge(EdgeId(2)));
}
