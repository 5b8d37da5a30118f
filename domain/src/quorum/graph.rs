//! Agreement graph over the enabled models

use serde::{Deserialize, Serialize};

/// Every unordered pair `(i, j)` with `i < j` over `count` positions, in
/// row-major order
pub fn all_pairs(count: usize) -> Vec<(usize, usize)> {
    (0..count)
        .flat_map(|i| ((i + 1)..count).map(move |j| (i, j)))
        .collect()
}

/// Undirected graph whose edges connect models whose answers a judge found equivalent
///
/// Nodes are positions in the enabled-model order. Edges are stored on both
/// endpoints, so `neighbors(a)` contains `b` exactly when `neighbors(b)`
/// contains `a`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementGraph {
    models: Vec<String>,
    adjacency: Vec<Vec<usize>>,
}

impl AgreementGraph {
    /// Graph with one node per model and no edges
    pub fn new(models: Vec<String>) -> Self {
        let adjacency = vec![Vec::new(); models.len()];
        Self { models, adjacency }
    }

    /// Record that the models at `a` and `b` agree
    ///
    /// Self-loops, out-of-range positions and repeated edges are ignored.
    pub fn add_agreement(&mut self, a: usize, b: usize) {
        if a == b || a >= self.models.len() || b >= self.models.len() {
            return;
        }
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
            self.adjacency[b].push(a);
        }
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Positions agreeing with `index`, in the order the agreements were recorded
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    /// Position with the strictly greatest degree, earliest position on ties
    ///
    /// Returns `None` when the graph has no edges.
    pub fn leader(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for index in 0..self.models.len() {
            let degree = self.degree(index);
            if degree == 0 {
                continue;
            }
            match best {
                Some((_, best_degree)) if degree <= best_degree => {}
                _ => best = Some((index, degree)),
            }
        }
        best.map(|(index, _)| index)
    }
}
