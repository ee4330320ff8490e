//! Rooted trees over dense node indices `{0..n}`.
//!
//! A [`RootedTree`] is built from an undirected set of tree edges and can be re-rooted at any
//! node. All queries take plain `usize` indices; callers wrap them in their own id types.

/// A rooted tree on nodes `{0..n}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootedTree {
    neighbours: Vec<Vec<usize>>,
    parent: Vec<Option<usize>>,
    depth: Vec<usize>,
    root: Option<usize>,
}

impl RootedTree {
    /// The tree with no nodes.
    pub fn empty() -> Self {
        RootedTree {
            neighbours: vec![],
            parent: vec![],
            depth: vec![],
            root: None,
        }
    }

    /// Build a tree on `n` nodes from undirected `edges`, rooted at `root`.
    ///
    /// Returns `None` if an edge endpoint or `root` is out of range, or if the edges do not form
    /// a spanning tree (wrong edge count, or some node is unreachable from `root`).
    pub fn new(n: usize, edges: &[(usize, usize)], root: usize) -> Option<Self> {
        if n == 0 {
            return edges.is_empty().then(Self::empty);
        }
        if root >= n || edges.len() != n - 1 {
            return None;
        }

        let mut neighbours = vec![vec![]; n];
        for &(a, b) in edges {
            if a >= n || b >= n {
                return None;
            }
            neighbours[a].push(b);
            neighbours[b].push(a);
        }

        let mut tree = RootedTree {
            neighbours,
            parent: vec![None; n],
            depth: vec![0; n],
            root: Some(root),
        };
        tree.orient(root).then_some(tree)
    }

    // Recompute parent and depth maps from a new root.
    // Returns false if some node was not reached.
    fn orient(&mut self, root: usize) -> bool {
        let n = self.neighbours.len();
        let mut seen = vec![false; n];
        let mut stack = vec![root];
        self.parent[root] = None;
        self.depth[root] = 0;
        seen[root] = true;

        while let Some(v) = stack.pop() {
            for &w in &self.neighbours[v] {
                if !seen[w] {
                    seen[w] = true;
                    self.parent[w] = Some(v);
                    self.depth[w] = self.depth[v] + 1;
                    stack.push(w);
                }
            }
        }

        self.root = Some(root);
        seen.into_iter().all(|s| s)
    }

    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn is_root(&self, v: usize) -> bool {
        self.root == Some(v)
    }

    /// Make `v` the new root. The root is left unchanged if `v` is not a node of this tree.
    pub fn reroot(&mut self, v: usize) -> Option<usize> {
        if v < self.len() {
            self.orient(v);
        }
        self.root
    }

    /// Parent of `v`, or `None` for the root.
    ///
    /// # Panics
    ///
    /// When `v` is out of range.
    pub fn parent(&self, v: usize) -> Option<usize> {
        self.parent[v]
    }

    /// Children of `v`.
    ///
    /// # Panics
    ///
    /// When `v` is out of range.
    pub fn children(&self, v: usize) -> Vec<usize> {
        self.neighbours[v]
            .iter()
            .copied()
            .filter(|&w| self.parent[w] == Some(v))
            .collect()
    }

    pub fn depth(&self, v: usize) -> usize {
        self.depth[v]
    }

    /// True if `parent` is the parent of `child`.
    pub fn is_parent(&self, parent: usize, child: usize) -> bool {
        self.parent[child] == Some(parent)
    }

    /// True if `child` is a child of `parent`.
    pub fn is_child(&self, child: usize, parent: usize) -> bool {
        self.is_parent(parent, child)
    }

    /// True if `ancestor` lies strictly above `v` on the path to the root.
    pub fn is_ancestor(&self, ancestor: usize, v: usize) -> bool {
        let mut node = self.parent[v];
        while let Some(p) = node {
            if p == ancestor {
                return true;
            }
            node = self.parent[p];
        }
        false
    }

    /// True if `v` lies strictly below `ancestor`.
    pub fn is_descendant(&self, v: usize, ancestor: usize) -> bool {
        self.is_ancestor(ancestor, v)
    }

    /// The lowest common ancestor of `v` and `w`, where a node counts as its own descendant.
    pub fn lca(&self, v: usize, w: usize) -> usize {
        let (mut a, mut b) = (v, w);
        while self.depth[a] > self.depth[b] {
            a = self.parent[a].expect("non-root node has a parent");
        }
        while self.depth[b] > self.depth[a] {
            b = self.parent[b].expect("non-root node has a parent");
        }
        while a != b {
            a = self.parent[a].expect("non-root node has a parent");
            b = self.parent[b].expect("non-root node has a parent");
        }
        a
    }

    /// Nodes in depth-first pre-order from the root.
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let Some(root) = self.root else {
            return order;
        };
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            order.push(v);
            let mut children = self.children(v);
            children.reverse();
            stack.extend(children);
        }
        order
    }
}
