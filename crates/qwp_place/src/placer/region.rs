//! Rectangular regions of the unit square, expressed per axis.

use std::fmt;

/// Slack allowed around a region when checking solved coordinates.
pub const BOUNDS_TOLERANCE: f64 = 0.1;

/// An interval on one axis given by its center and half width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Midpoint.
    pub center: f64,
    /// Half the width.
    pub half_width: f64,
}

impl Interval {
    /// The whole unit interval.
    pub const UNIT: Interval = Interval {
        center: 0.5,
        half_width: 0.5,
    };

    /// Creates an interval.
    pub fn new(center: f64, half_width: f64) -> Self {
        Self { center, half_width }
    }

    /// Lower end.
    pub fn low(&self) -> f64 {
        self.center - self.half_width
    }

    /// Upper end.
    pub fn high(&self) -> f64 {
        self.center + self.half_width
    }

    /// Returns the limits widened by [`BOUNDS_TOLERANCE`].
    pub fn tolerance_band(&self) -> (f64, f64) {
        (self.low() - BOUNDS_TOLERANCE, self.high() + BOUNDS_TOLERANCE)
    }

    /// Returns `true` if `value` lies within the tolerance band.
    pub fn admits(&self, value: f64) -> bool {
        let (low, high) = self.tolerance_band();
        low <= value && value <= high
    }

    /// Returns `true` once the interval is no wider than `grid`.
    pub fn within_grid(&self, grid: f64) -> bool {
        2.0 * self.half_width <= grid
    }

    /// The lower half.
    pub fn lower_half(&self) -> Self {
        Self::new(self.center - self.half_width / 2.0, self.half_width / 2.0)
    }

    /// The upper half.
    pub fn upper_half(&self) -> Self {
        Self::new(self.center + self.half_width / 2.0, self.half_width / 2.0)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.low(), self.high())
    }
}

/// The region of one recursion frame: an interval on the axis being solved
/// and one on the other axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Interval on the axis the frame solves.
    pub primary: Interval,
    /// Interval on the other axis.
    pub secondary: Interval,
}

impl Region {
    /// The unit square.
    pub const UNIT: Region = Region {
        primary: Interval::UNIT,
        secondary: Interval::UNIT,
    };

    /// Returns `true` if the region is no wider than `grid` on both axes.
    pub fn is_leaf(&self, grid: f64) -> bool {
        self.primary.within_grid(grid) && self.secondary.within_grid(grid)
    }

    /// Splits along the primary axis and returns the child regions with the
    /// axis roles exchanged: each child's primary interval is this region's
    /// secondary one.
    pub fn split(&self) -> (Region, Region) {
        let left = Region {
            primary: self.secondary,
            secondary: self.primary.lower_half(),
        };
        let right = Region {
            primary: self.secondary,
            secondary: self.primary.upper_half(),
        };
        (left, right)
    }
}
