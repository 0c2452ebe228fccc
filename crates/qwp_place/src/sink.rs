//! Delivery of final coordinates to the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A location in the unit square.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Receives the final coordinates of each placed element.
///
/// Called once per element after the whole recursion has finished, in the
/// order the elements were listed by the source.
pub trait PositionSink<K> {
    /// Records the position of the element identified by `key`.
    fn record(&mut self, key: K, name: &str, position: Point);
}

impl<K, F> PositionSink<K> for F
where
    F: FnMut(K, &str, Point),
{
    fn record(&mut self, key: K, name: &str, position: Point) {
        self(key, name, position)
    }
}

/// Final positions keyed by element name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placement {
    positions: BTreeMap<String, Point>,
}

impl Placement {
    /// Creates an empty placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position of the named element.
    pub fn get(&self, name: &str) -> Option<Point> {
        self.positions.get(name).copied()
    }

    /// Iterates over `(name, position)` sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.positions.iter().map(|(n, p)| (n.as_str(), *p))
    }

    /// Number of placed elements.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Renders `name x y` lines with six decimals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (name, p) in self.iter() {
            out.push_str(&format!("{name} {:.6} {:.6}\n", p.x, p.y));
        }
        out
    }
}

impl<K> PositionSink<K> for Placement {
    fn record(&mut self, _key: K, name: &str, position: Point) {
        self.positions.insert(name.to_string(), position);
    }
}
