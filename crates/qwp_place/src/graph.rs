//! Nodes and weighted edges of one placement frame.
//!
//! A [`Graph`] is owned by exactly one recursion frame. Nodes store their
//! coordinates relative to the axis the frame solves: `pos` is the primary
//! coordinate and `alt_pos` the secondary one. Children receive copies with
//! the two roles exchanged.

use crate::ids::ElementSlot;
use crate::rng::Xorshift32;
use crate::sink::Point;
use qwp_config::Axis;
use std::collections::BTreeMap;

/// A point that takes part in placement: a real element, a boundary
/// terminal, or a placeholder standing in for a node outside the region.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The element this node places, `None` for terminals and placeholders.
    pub element: Option<ElementSlot>,
    /// The primary coordinate is fixed.
    pub tied: bool,
    /// The secondary coordinate is fixed.
    pub alt_tied: bool,
    /// Coordinate on the axis being solved.
    pub pos: f64,
    /// Coordinate on the other axis.
    pub alt_pos: f64,
}

impl Node {
    /// Creates a free node at a random location. Draws `pos` first, then
    /// `alt_pos`.
    pub fn new(element: Option<ElementSlot>, rng: &mut Xorshift32) -> Self {
        let pos = rng.next_unit();
        let alt_pos = rng.next_unit();
        Self {
            element,
            tied: false,
            alt_tied: false,
            pos,
            alt_pos,
        }
    }

    /// Fixes the primary coordinate at `value`.
    pub fn tie(&mut self, value: f64) {
        self.pos = value;
        self.tied = true;
    }

    /// Fixes the secondary coordinate at `value`.
    pub fn alt_tie(&mut self, value: f64) {
        self.alt_pos = value;
        self.alt_tied = true;
    }

    /// Exchanges the primary and secondary roles.
    pub fn swap_axes(&mut self) {
        std::mem::swap(&mut self.pos, &mut self.alt_pos);
        std::mem::swap(&mut self.tied, &mut self.alt_tied);
    }

    /// Returns `true` if the node places a real element.
    pub fn is_element(&self) -> bool {
        self.element.is_some()
    }

    /// Builds the placeholder that represents this node in a child region:
    /// no element, primary coordinate tied to `value`, roles already swapped
    /// for the child.
    pub fn placeholder(&self, value: f64) -> Self {
        let mut node = Self {
            element: None,
            ..self.clone()
        };
        node.tie(value);
        node.swap_axes();
        node
    }

    /// Returns the node's location given the axis `pos` refers to.
    pub fn point(&self, primary: Axis) -> Point {
        match primary {
            Axis::X => Point::new(self.pos, self.alt_pos),
            Axis::Y => Point::new(self.alt_pos, self.pos),
        }
    }
}

/// The nodes and edges of one recursion frame.
#[derive(Debug, Clone)]
pub struct Graph {
    /// The axis `Node::pos` refers to.
    pub axis: Axis,
    /// Nodes, addressed by index.
    pub nodes: Vec<Node>,
    edges: BTreeMap<(usize, usize), f64>,
}

impl Graph {
    /// Creates an empty graph solved along `axis`.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            nodes: Vec::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Appends a node and returns its index.
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Adds `weight` to the edge between `a` and `b`.
    ///
    /// The pair is stored as `(low, high)`, so the argument order does not
    /// matter. Self-loops are ignored.
    pub fn add_edge_weight(&mut self, a: usize, b: usize, weight: f64) {
        if a == b {
            return;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        *self.edges.entry(key).or_insert(0.0) += weight;
    }

    /// Returns the accumulated weight between `a` and `b`, if connected.
    pub fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edges.get(&key).copied()
    }

    /// Iterates over `(low, high, weight)` in ascending pair order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.edges.iter().map(|(&(a, b), &w)| (a, b, w))
    }

    /// Number of nodes that place a real element.
    pub fn element_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_element()).count()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_draws_pos_then_alt_pos() {
        let mut rng = Xorshift32::new(5);
        let mut check = Xorshift32::new(5);
        let node = Node::new(None, &mut rng);
        assert_eq!(node.pos, check.next_unit());
        assert_eq!(node.alt_pos, check.next_unit());
        assert!(!node.tied && !node.alt_tied);
    }

    #[test]
    fn swap_exchanges_values_and_ties() {
        let mut rng = Xorshift32::new(5);
        let mut node = Node::new(Some(ElementSlot::from_raw(0)), &mut rng);
        node.tie(0.0);
        node.alt_pos = 0.75;
        node.swap_axes();
        assert_eq!(node.pos, 0.75);
        assert_eq!(node.alt_pos, 0.0);
        assert!(!node.tied);
        assert!(node.alt_tied);
    }

    #[test]
    fn placeholder_is_tied_in_the_parent_axis() {
        let mut rng = Xorshift32::new(5);
        let mut node = Node::new(Some(ElementSlot::from_raw(3)), &mut rng);
        node.alt_pos = 0.2;
        let ph = node.placeholder(0.5);
        assert!(!ph.is_element());
        assert_eq!(ph.alt_pos, 0.5);
        assert!(ph.alt_tied);
        assert_eq!(ph.pos, 0.2);
        assert!(!ph.tied);
    }

    #[test]
    fn point_respects_axis() {
        let node = Node {
            element: None,
            tied: false,
            alt_tied: false,
            pos: 0.1,
            alt_pos: 0.9,
        };
        assert_eq!(node.point(Axis::X), Point::new(0.1, 0.9));
        assert_eq!(node.point(Axis::Y), Point::new(0.9, 0.1));
    }

    #[test]
    fn edges_are_canonical_and_accumulate() {
        let mut g = Graph::new(Axis::X);
        g.add_edge_weight(2, 1, 0.5);
        g.add_edge_weight(1, 2, 0.25);
        g.add_edge_weight(0, 3, 1.0);
        g.add_edge_weight(4, 4, 1.0);
        assert_eq!(g.edge_weight(1, 2), Some(0.75));
        assert_eq!(g.edge_weight(2, 1), Some(0.75));
        assert_eq!(g.edge_count(), 2);
        let order: Vec<_> = g.edges().map(|(a, b, _)| (a, b)).collect();
        assert_eq!(order, vec![(0, 3), (1, 2)]);
    }
}
