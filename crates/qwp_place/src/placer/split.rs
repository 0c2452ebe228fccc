//! Median split of a frame into two child frames.

use crate::graph::{Graph, Node};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A child frame under construction, plus the mapping from parent node
/// indices to child node indices.
#[derive(Debug)]
pub(crate) struct ChildGraph {
    pub(crate) graph: Graph,
    map: BTreeMap<usize, usize>,
    pub(crate) placeholders: usize,
}

/// Which side of the median a child covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// Moves `value` onto this side of `mid`.
    fn clamp(self, value: f64, mid: f64) -> f64 {
        match self {
            Side::Left if value > mid => mid,
            Side::Right if value < mid => mid,
            _ => value,
        }
    }
}

impl ChildGraph {
    fn new(parent: &Graph) -> Self {
        Self {
            graph: Graph::new(parent.axis.other()),
            map: BTreeMap::new(),
            placeholders: 0,
        }
    }

    fn index_of(&self, parent_idx: usize) -> Option<usize> {
        self.map.get(&parent_idx).copied()
    }

    /// Copies an assigned element into the child, clamped to `side`.
    fn adopt(&mut self, parent_idx: usize, node: &Node, side: Side, mid: f64) {
        let mut child = node.clone();
        child.pos = side.clamp(child.pos, mid);
        child.swap_axes();
        let idx = self.graph.add_node(child);
        self.map.insert(parent_idx, idx);
    }

    /// Adds a placeholder for a parent node that is not in this child.
    fn project(&mut self, parent_idx: usize, node: &Node, side: Side, mid: f64) -> usize {
        let idx = self
            .graph
            .add_node(node.placeholder(side.clamp(node.pos, mid)));
        self.map.insert(parent_idx, idx);
        self.placeholders += 1;
        idx
    }

    /// Copies solved coordinates of adopted elements back into `parent`.
    pub(crate) fn reintegrate(&self, parent: &mut Graph) {
        for (&parent_idx, &child_idx) in &self.map {
            let child = &self.graph.nodes[child_idx];
            if child.is_element() {
                let node = &mut parent.nodes[parent_idx];
                node.pos = child.alt_pos;
                node.alt_pos = child.pos;
            }
        }
    }

    /// Carries one parent edge into this child, synthesizing a placeholder
    /// when exactly one endpoint is present and the present one is an
    /// element of the parent.
    fn carry_edge(&mut self, parent: &Graph, a: usize, b: usize, weight: f64, side: Side, mid: f64) {
        let mut ia = self.index_of(a);
        let mut ib = self.index_of(b);

        if parent.nodes[a].is_element() && ia.is_some() && ib.is_none() {
            ib = Some(self.project(b, &parent.nodes[b], side, mid));
        } else if parent.nodes[b].is_element() && ib.is_some() && ia.is_none() {
            ia = Some(self.project(a, &parent.nodes[a], side, mid));
        }

        if let (Some(ia), Some(ib)) = (ia, ib) {
            self.graph.add_edge_weight(ia, ib, weight);
        }
    }
}

/// Splits `graph` at the median of its elements' primary coordinates.
///
/// Returns `None` when there are fewer than two elements to divide. The
/// first half (rounded down) of the elements, in ascending coordinate order
/// with ties broken by index, goes to the left child.
pub(crate) fn split_at_median(graph: &Graph, mid: f64) -> Option<(ChildGraph, ChildGraph)> {
    let mut sorted: Vec<(f64, usize)> = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.is_element())
        .map(|(i, n)| (n.pos, i))
        .collect();
    if sorted.len() < 2 {
        return None;
    }
    sorted.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });

    let mut left = ChildGraph::new(graph);
    let mut right = ChildGraph::new(graph);
    let half = sorted.len() / 2;
    for (k, &(_, i)) in sorted.iter().enumerate() {
        if k < half {
            left.adopt(i, &graph.nodes[i], Side::Left, mid);
        } else {
            right.adopt(i, &graph.nodes[i], Side::Right, mid);
        }
    }

    for (a, b, weight) in graph.edges() {
        if !graph.nodes[a].is_element() && !graph.nodes[b].is_element() {
            continue;
        }
        left.carry_edge(graph, a, b, weight, Side::Left, mid);
        right.carry_edge(graph, a, b, weight, Side::Right, mid);
    }

    Some((left, right))
}
