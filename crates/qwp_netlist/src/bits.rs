//! Single-bit signal references.

use crate::ids::WireId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A constant logic level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Logic {
    /// Logic low.
    #[serde(rename = "0")]
    Zero,
    /// Logic high.
    #[serde(rename = "1")]
    One,
    /// Unknown value.
    #[serde(rename = "x")]
    X,
    /// High impedance.
    #[serde(rename = "z")]
    Z,
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        };
        write!(f, "{c}")
    }
}

/// One bit of a signal: either a bit of a wire or a constant.
///
/// Constants are ordered before wire bits, which makes a constant the
/// preferred representative when the [`SigMap`](crate::SigMap) merges an
/// alias class.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigBit {
    /// A constant driver.
    Const(Logic),
    /// Bit `offset` of `wire`.
    Wire {
        /// The wire the bit belongs to.
        wire: WireId,
        /// Bit index within the wire, starting at 0.
        offset: u32,
    },
}

impl SigBit {
    /// Shorthand for a wire bit.
    pub fn wire(wire: WireId, offset: u32) -> Self {
        SigBit::Wire { wire, offset }
    }

    /// Returns `true` for constant bits.
    pub fn is_const(self) -> bool {
        matches!(self, SigBit::Const(_))
    }
}
