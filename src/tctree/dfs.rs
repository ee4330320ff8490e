//! The three depth-first searches of the triconnectivity algorithm.
//!
//! 1. [`LowPoints`] numbers vertices, classifies edges into tree arcs and fronds, and computes
//!    low-points and descendant counts.
//! 2. [`order_adjacency`] sorts adjacency lists by the potential φ, and [`Numbering`] walks the
//!    sorted lists to renumber vertices and build high-point lists.
//! 3. [`PathSearch`] walks the sorted lists again, splitting off components at separation pairs.
//!
//! Vertex numbers are 1-based; `0` means "not visited".
//!
//! All three searches keep their own stack of suspended vertices, so the depth of the DFS tree is
//! bounded by memory rather than by the call stack.
use std::collections::VecDeque;

use super::attributes::{Adjacency, EdgeMap, EdgeType, VertexMap, WorkGraph};

/// Results of the first depth-first search.
#[derive(Debug, Clone)]
pub(crate) struct LowPoints {
    pub number: VertexMap<usize>,
    pub completion: VertexMap<usize>,
    pub low1: VertexMap<usize>,
    pub low2: VertexMap<usize>,
    pub descendants: VertexMap<usize>,
    pub parent: VertexMap<Option<usize>>,
    pub tree_arc: VertexMap<Option<usize>>,
    pub degree: VertexMap<usize>,
    pub edge_type: EdgeMap<EdgeType>,
    pub root: usize,
    visited: usize,
    completed: usize,
}

impl LowPoints {
    /// Run the first search over the visible edges of `g`, starting from `root`.
    pub fn compute<E>(g: &WorkGraph<E>, root: usize) -> Self {
        let n = g.vertex_count();
        let mut lp = LowPoints {
            number: VertexMap::new(n, 0),
            completion: VertexMap::new(n, 0),
            low1: VertexMap::new(n, 0),
            low2: VertexMap::new(n, 0),
            descendants: VertexMap::new(n, 0),
            parent: VertexMap::new(n, None),
            tree_arc: VertexMap::new(n, None),
            degree: VertexMap::new(n, 0),
            edge_type: EdgeMap::new(g.edge_count(), EdgeType::Unseen),
            root,
            visited: 0,
            completed: 0,
        };
        lp.search(g);

        for v in 0..n {
            tracing::trace!(
                vertex = v,
                number = lp.number[v],
                completion = lp.completion[v],
                low1 = lp.low1[v],
                low2 = lp.low2[v],
                descendants = lp.descendants[v],
                parent = ?lp.parent[v],
                "first dfs"
            );
        }
        lp
    }

    // Each stack entry is a vertex and the position of the next incidence to look at.
    fn search<E>(&mut self, g: &WorkGraph<E>) {
        self.enter_vertex(g, self.root, None);
        let mut stack = vec![(self.root, 0)];

        while let Some(top) = stack.last_mut() {
            let (v, i) = *top;
            let Some(&e) = g.incidence(v).get(i) else {
                stack.pop();
                self.exit_vertex(v);
                if let Some(&(u, _)) = stack.last() {
                    self.exit_tree_arc(u, v);
                }
                continue;
            };
            top.1 += 1;

            if g.is_hidden(e) || self.edge_type[e] != EdgeType::Unseen {
                continue;
            }

            let w = g.opposite(e, v);
            if self.number[w] == 0 {
                self.edge_type[e] = EdgeType::Tree;
                self.tree_arc[w] = Some(e);
                self.enter_vertex(g, w, Some(v));
                stack.push((w, 0));
            } else {
                self.edge_type[e] = EdgeType::Frond;
                self.visit_frond(v, w);
            }
        }
    }

    fn enter_vertex<E>(&mut self, g: &WorkGraph<E>, v: usize, parent: Option<usize>) {
        self.visited += 1;
        let vnum = self.visited;
        self.number[v] = vnum;
        self.parent[v] = parent;
        self.degree[v] = g.degree(v);
        self.low1[v] = vnum;
        self.low2[v] = vnum;
        self.descendants[v] = 1;
    }

    fn exit_vertex(&mut self, v: usize) {
        self.completed += 1;
        self.completion[v] = self.completed;
    }

    // Fold the low-points of the finished child `w` into its parent `v`.
    fn exit_tree_arc(&mut self, v: usize, w: usize) {
        if self.low1[w] < self.low1[v] {
            self.low2[v] = self.low1[v].min(self.low2[w]);
            self.low1[v] = self.low1[w];
        } else if self.low1[w] == self.low1[v] {
            self.low2[v] = self.low2[v].min(self.low2[w]);
        } else {
            self.low2[v] = self.low2[v].min(self.low1[w]);
        }
        self.descendants[v] += self.descendants[w];
    }

    fn visit_frond(&mut self, v: usize, w: usize) {
        let wnum = self.number[w];
        if wnum < self.low1[v] {
            self.low2[v] = self.low1[v];
            self.low1[v] = wnum;
        } else if wnum > self.low1[v] {
            self.low2[v] = self.low2[v].min(wnum);
        }
    }

    /// True if the search reached every vertex and found no cut vertex.
    pub fn is_biconnected(&self) -> bool {
        let n = self.number.0.len();
        if self.visited != n {
            return false;
        }

        let mut root_children = 0;
        for w in 0..n {
            match self.parent[w] {
                Some(v) if v == self.root => root_children += 1,
                Some(v) => {
                    if self.low1[w] >= self.number[v] {
                        return false;
                    }
                }
                None => {}
            }
        }
        root_children <= 1
    }

    /// Orient tree arcs from parent to child, and fronds from descendant to ancestor.
    pub fn orient<E>(&self, g: &mut WorkGraph<E>) {
        let edges: Vec<usize> = g.visible_edges().collect();
        for e in edges {
            let (s, t) = (g.source(e), g.target(e));
            let reversed = match self.edge_type[e] {
                EdgeType::Tree => self.parent[t] != Some(s),
                EdgeType::Frond => self.number[s] < self.number[t],
                EdgeType::Unseen => false,
            };
            if reversed {
                g.reverse(e);
            }
        }
    }
}

/// Sort the outgoing edges of every vertex by their potential φ:
///
/// - tree arc `v → w` with `low2(w) < v`: `3·low1(w)`
/// - tree arc `v → w` otherwise: `3·low1(w) + 2`
/// - frond `v ↪ w`: `3·w + 1`
///
/// Edges must already be oriented with [`LowPoints::orient`].
pub(crate) fn order_adjacency<E>(g: &WorkGraph<E>, lp: &LowPoints) -> Adjacency {
    let n = g.vertex_count();
    let mut buckets: Vec<Vec<usize>> = vec![vec![]; 3 * n + 2];

    for e in g.visible_edges() {
        let (v, w) = (g.source(e), g.target(e));
        let phi = match lp.edge_type[e] {
            EdgeType::Tree if lp.low2[w] < lp.number[v] => 3 * lp.low1[w],
            EdgeType::Tree => 3 * lp.low1[w] + 2,
            EdgeType::Frond => 3 * lp.number[w] + 1,
            EdgeType::Unseen => continue,
        };
        buckets[phi - 1].push(e);
    }

    let mut adj = Adjacency::new(n);
    for e in buckets.into_iter().flatten() {
        adj.push(g.source(e), e);
    }
    adj
}

/// Per-vertex high-point lists: the numbers of the sources of fronds entering a vertex, in the
/// order the fronds are visited. Entries are addressed by handle so they can be deleted.
#[derive(Debug, Clone)]
pub(crate) struct HighPoints {
    lists: Vec<VecDeque<usize>>,
    // (value, alive) for each handle
    entries: Vec<(usize, bool)>,
    pub in_high: EdgeMap<Option<usize>>,
}

impl HighPoints {
    fn new(n: usize) -> Self {
        HighPoints {
            lists: vec![VecDeque::new(); n],
            entries: vec![],
            in_high: EdgeMap::new(0, None),
        }
    }

    fn new_entry(&mut self, value: usize) -> usize {
        self.entries.push((value, true));
        self.entries.len() - 1
    }

    pub fn push_back(&mut self, v: usize, value: usize) -> usize {
        let h = self.new_entry(value);
        self.lists[v].push_back(h);
        h
    }

    pub fn push_front(&mut self, v: usize, value: usize) -> usize {
        let h = self.new_entry(value);
        self.lists[v].push_front(h);
        h
    }

    /// The first live high-point of `v`, or `0` if there is none.
    pub fn high(&self, v: usize) -> usize {
        self.lists[v]
            .iter()
            .map(|&h| self.entries[h])
            .find(|&(_, alive)| alive)
            .map(|(value, _)| value)
            .unwrap_or(0)
    }

    /// Delete the entry recorded for edge `e`, if any.
    pub fn remove(&mut self, e: usize) {
        if let Some(h) = self.in_high[e].take() {
            self.entries[h].1 = false;
        }
    }
}

/// Results of the second depth-first search.
#[derive(Debug, Clone)]
pub(crate) struct Numbering {
    pub newnum: VertexMap<usize>,
    /// `node_at[k]` is the vertex numbered `k`. Index `0` is unused.
    pub node_at: Vec<usize>,
    pub starts_path: EdgeMap<bool>,
    pub high: HighPoints,
    count: usize,
    new_path: bool,
}

impl Numbering {
    /// Renumber vertices so that, walking `adj` in order, the children of a vertex receive
    /// decreasing blocks of numbers. Low-points in `lp` are translated to the new numbering.
    pub fn compute<E>(g: &WorkGraph<E>, lp: &mut LowPoints, adj: &Adjacency) -> Self {
        let n = g.vertex_count();
        let mut num = Numbering {
            newnum: VertexMap::new(n, 0),
            node_at: vec![0; n + 1],
            starts_path: EdgeMap::new(g.edge_count(), false),
            high: HighPoints::new(n),
            count: n,
            new_path: true,
        };
        num.search(g, lp, adj);

        let mut old_to_new = vec![0; n + 1];
        for v in 0..n {
            old_to_new[lp.number[v]] = num.newnum[v];
            num.node_at[num.newnum[v]] = v;
        }
        for v in 0..n {
            lp.low1[v] = old_to_new[lp.low1[v]];
            lp.low2[v] = old_to_new[lp.low2[v]];
            tracing::trace!(
                vertex = v,
                newnum = num.newnum[v],
                high = num.high.high(v),
                "second dfs"
            );
        }
        num
    }

    // Each stack entry is a vertex and its next adjacency slot.
    fn search<E>(&mut self, g: &WorkGraph<E>, lp: &LowPoints, adj: &Adjacency) {
        self.enter_vertex(lp, lp.root);
        let mut stack = vec![(lp.root, 0)];

        while let Some(top) = stack.last_mut() {
            let (v, slot) = *top;
            if slot == adj.len(v) {
                stack.pop();
                if !stack.is_empty() {
                    self.count -= 1;
                }
                continue;
            }
            top.1 += 1;

            let Some(e) = adj.get(v, slot) else {
                continue;
            };
            let w = g.target(e);
            if self.new_path {
                self.new_path = false;
                self.starts_path[e] = true;
            }

            if lp.edge_type[e] == EdgeType::Tree {
                self.enter_vertex(lp, w);
                stack.push((w, 0));
            } else {
                let h = self.high.push_back(w, self.newnum[v]);
                self.high.in_high[e] = Some(h);
                self.new_path = true;
            }
        }
    }

    fn enter_vertex(&mut self, lp: &LowPoints, v: usize) {
        self.newnum[v] = self.count + 1 - lp.descendants[v];
    }
}

// A triple (h, a, b) on the separation-pair stack, or `None` for an end-of-segment marker.
type Triple = Option<(usize, usize, usize)>;

/// The third depth-first search, emitting split components as lists of working-graph edges.
pub(crate) struct PathSearch<'a, E> {
    g: &'a mut WorkGraph<E>,
    lp: LowPoints,
    num: Numbering,
    adj: Adjacency,
    tstack: Vec<Triple>,
    estack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl<'a, E> PathSearch<'a, E> {
    pub fn new(g: &'a mut WorkGraph<E>, lp: LowPoints, num: Numbering, adj: Adjacency) -> Self {
        PathSearch {
            g,
            lp,
            num,
            adj,
            tstack: vec![None],
            estack: vec![],
            components: vec![],
        }
    }

    /// Run the search from the root of the first DFS.
    /// Every virtual edge created along the way ends up in exactly two returned components.
    pub fn run(mut self) -> Vec<Vec<usize>> {
        let root = self.lp.root;
        self.search(root);

        let last: Vec<usize> = self.estack.drain(..).rev().collect();
        if !last.is_empty() {
            self.components.push(last);
        }
        self.components
    }

    fn top(&self) -> Triple {
        self.tstack.last().copied().flatten()
    }

    fn top_a_exceeds(&self, x: usize) -> bool {
        self.top().is_some_and(|(_, a, _)| a > x)
    }

    fn push_triple(&mut self, h: usize, a: usize, b: usize) {
        self.tstack.push(Some((h, a, b)));
    }

    fn push_eos(&mut self) {
        self.tstack.push(None);
    }

    // Pop every triple with a > `low`, and replace them with one triple spanning all of them.
    // Returns false if no triple was popped.
    fn merge_triples(&mut self, low: usize) -> bool {
        if !self.top_a_exceeds(low) {
            return false;
        }
        let (mut y, mut b) = (0, 0);
        while let Some((h, a, bb)) = self.top() {
            if a <= low {
                break;
            }
            self.tstack.pop();
            y = y.max(h);
            b = bb;
        }
        self.push_triple(y, low, b);
        true
    }

    fn new_virtual_edge(&mut self, s: usize, t: usize) -> usize {
        self.g.new_virtual_edge(s, t)
    }

    // `w` has exactly two edges, and its first outgoing edge is a tree arc.
    fn is_chain(&self, w: usize) -> bool {
        let wnum = self.num.newnum[w];
        self.lp.degree[w] == 2
            && self
                .adj
                .first(w)
                .is_some_and(|f| self.num.newnum[self.g.target(f)] > wnum)
    }

    fn remove_edge_degrees(&mut self, e: usize) {
        let (s, t) = (self.g.source(e), self.g.target(e));
        self.lp.degree[s] -= 1;
        self.lp.degree[t] -= 1;
    }

    fn frame(&self, v: usize) -> Frame {
        Frame {
            v,
            slot: 0,
            outv: self.adj.live_count(v),
            descent: None,
        }
    }

    fn search(&mut self, root: usize) {
        let mut stack = vec![self.frame(root)];

        while let Some(top) = stack.last_mut() {
            let (v, slot) = (top.v, top.slot);

            if let Some((e, w)) = top.descent.take() {
                let outv = top.outv;
                top.outv -= 1;
                top.slot += 1;
                self.exit_tree_arc(v, slot, e, w, outv);
                continue;
            }

            if slot == self.adj.len(v) {
                stack.pop();
                continue;
            }
            let Some(e) = self.adj.get(v, slot) else {
                top.slot += 1;
                continue;
            };

            let vnum = self.num.newnum[v];
            let w = self.g.target(e);
            let wnum = self.num.newnum[w];

            if self.lp.edge_type[e] != EdgeType::Tree {
                // frond v ↪ w
                if self.num.starts_path[e] && !self.merge_triples(wnum) {
                    self.push_triple(vnum, wnum, vnum);
                }
                self.estack.push(e);
                top.slot += 1;
                continue;
            }

            if self.num.starts_path[e] {
                let low = self.lp.low1[w];
                if !self.merge_triples(low) {
                    self.push_triple(wnum + self.lp.descendants[w] - 1, low, vnum);
                }
                self.push_eos();
            }

            top.descent = Some((e, w));
            let child = self.frame(w);
            stack.push(child);
        }
    }

    // Work left at `v` once the subtree below the tree arc `e = v → w` in `slot` is finished:
    // splitting off type-2 and type-1 separation pairs and cleaning up the triple stack.
    // `outv` counts the outgoing edges of `v` not yet finished, this one included.
    fn exit_tree_arc(&mut self, v: usize, slot: usize, e: usize, w: usize, outv: usize) {
        let vnum = self.num.newnum[v];
        let mut w = w;
        let mut wnum = self.num.newnum[w];

        if let Some(arc) = self.lp.tree_arc[w] {
            self.estack.push(arc);
        }

        // type-2 separation pairs
        while vnum != 1 && (self.top().is_some_and(|(_, a, _)| a == vnum) || self.is_chain(w))
        {
            let top = self.top();
            if let Some((_, a, b)) = top {
                let (na, nb) = (self.num.node_at[a], self.num.node_at[b]);
                if a == vnum && self.lp.parent[nb] == Some(na) {
                    self.tstack.pop();
                    continue;
                }
            }

            let mut e_ab = None;
            let mut e_virt;
            let x;

            if self.is_chain(w) {
                let (Some(e1), Some(e2)) = (self.estack.pop(), self.estack.pop()) else {
                    break;
                };
                self.adj.remove(e1);
                self.adj.remove(e2);

                x = self.g.target(e2);
                e_virt = self.new_virtual_edge(v, x);
                self.lp.degree[x] -= 1;
                self.lp.degree[v] -= 1;
                self.components.push(vec![e1, e2, e_virt]);

                if let Some(&top_edge) = self.estack.last() {
                    if self.g.source(top_edge) == x && self.g.target(top_edge) == v {
                        self.estack.pop();
                        self.adj.remove(top_edge);
                        self.num.high.remove(top_edge);
                        e_ab = Some(top_edge);
                    }
                }
            } else {
                let Some((h, a, b)) = top else {
                    break;
                };
                self.tstack.pop();

                let mut component = vec![];
                while let Some(&xy) = self.estack.last() {
                    let xs = self.num.newnum[self.g.source(xy)];
                    let xt = self.num.newnum[self.g.target(xy)];
                    if !(a <= xs && xs <= h && a <= xt && xt <= h) {
                        break;
                    }

                    self.estack.pop();
                    if (xs == a && xt == b) || (xt == a && xs == b) {
                        self.adj.remove(xy);
                        self.num.high.remove(xy);
                        e_ab = Some(xy);
                    } else {
                        if self.adj.position(xy) != Some((v, slot)) {
                            self.adj.remove(xy);
                            self.num.high.remove(xy);
                        }
                        component.push(xy);
                        self.remove_edge_degrees(xy);
                    }
                }

                let (na, nb) = (self.num.node_at[a], self.num.node_at[b]);
                e_virt = self.new_virtual_edge(na, nb);
                component.push(e_virt);
                self.components.push(component);
                x = nb;
            }

            if let Some(e_ab) = e_ab {
                let bond_virt = self.new_virtual_edge(v, x);
                self.components.push(vec![e_ab, e_virt, bond_virt]);
                e_virt = bond_virt;
                self.lp.degree[x] -= 1;
                self.lp.degree[v] -= 1;
            }

            self.estack.push(e_virt);
            self.adj.replace(v, slot, e_virt);
            self.lp.degree[x] += 1;
            self.lp.degree[v] += 1;
            self.lp.parent[x] = Some(v);
            self.lp.tree_arc[x] = Some(e_virt);
            self.lp.edge_type[e_virt] = EdgeType::Tree;

            w = x;
            wnum = self.num.newnum[w];
        }

        // type-1 separation pair (lowpt1(w), v)
        let low1 = self.lp.low1[w];
        if self.lp.low2[w] >= vnum
            && low1 < vnum
            && (self.lp.parent[v] != Some(self.lp.root) || outv >= 2)
        {
            let end = wnum + self.lp.descendants[w];
            let in_subtree = |k: usize| wnum <= k && k < end;
            let mut component = vec![];
            while let Some(&xy) = self.estack.last() {
                let xs = self.num.newnum[self.g.source(xy)];
                let xt = self.num.newnum[self.g.target(xy)];
                if !(in_subtree(xs) || in_subtree(xt)) {
                    break;
                }
                self.estack.pop();
                self.num.high.remove(xy);
                component.push(xy);
                self.remove_edge_degrees(xy);
            }

            let low_node = self.num.node_at[low1];
            let mut e_virt = self.new_virtual_edge(v, low_node);
            component.push(e_virt);
            self.components.push(component);

            if let Some(&eh) = self.estack.last() {
                let (s, t) = (self.g.source(eh), self.g.target(eh));
                if (s == v && t == low_node) || (t == v && s == low_node) {
                    self.estack.pop();
                    if self.adj.position(eh) != Some((v, slot)) {
                        self.adj.remove(eh);
                    }
                    let bond_virt = self.new_virtual_edge(v, low_node);
                    self.num.high.in_high[bond_virt] = self.num.high.in_high[eh];
                    self.components.push(vec![eh, e_virt, bond_virt]);
                    e_virt = bond_virt;
                    self.lp.degree[v] -= 1;
                    self.lp.degree[low_node] -= 1;
                }
            }

            if Some(low_node) != self.lp.parent[v] {
                self.estack.push(e_virt);
                self.adj.replace(v, slot, e_virt);
                if self.num.high.in_high[e_virt].is_none() && self.num.high.high(low_node) < vnum
                {
                    let h = self.num.high.push_front(low_node, vnum);
                    self.num.high.in_high[e_virt] = Some(h);
                }
                self.lp.degree[v] += 1;
                self.lp.degree[low_node] += 1;
            } else {
                self.adj.remove_slot(v, slot);
                let tree_virt = self.new_virtual_edge(low_node, v);
                let mut bond = vec![e_virt, tree_virt];
                if let Some(eh) = self.lp.tree_arc[v] {
                    bond.push(eh);
                    self.adj.replace_edge(eh, tree_virt);
                }
                self.components.push(bond);
                self.lp.tree_arc[v] = Some(tree_virt);
                self.lp.edge_type[tree_virt] = EdgeType::Tree;
            }
        }

        if self.num.starts_path[e] {
            while self.top().is_some() {
                self.tstack.pop();
            }
            self.tstack.pop();
        }

        let high_v = self.num.high.high(v);
        while let Some((h, _, b)) = self.top() {
            if b == vnum || high_v <= h {
                break;
            }
            self.tstack.pop();
        }
    }
}

// One suspended activation of the path search.
struct Frame {
    v: usize,
    // next adjacency slot of `v`
    slot: usize,
    outv: usize,
    // tree arc being descended and its head
    descent: Option<(usize, usize)>,
}
