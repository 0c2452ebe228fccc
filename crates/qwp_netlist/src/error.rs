//! Error types for netlist construction, validation and loading.

use crate::ids::WireId;

/// Errors reported while building or loading a [`Netlist`](crate::Netlist).
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// Two wires or two elements share a name.
    #[error("duplicate name '{0}'")]
    DuplicateName(String),

    /// A bit refers to a wire that does not exist.
    #[error("reference to unknown wire {0}")]
    UnknownWire(WireId),

    /// A bit refers past the end of its wire.
    #[error("bit {offset} is out of range for wire '{wire}' of width {width}")]
    BitOutOfRange {
        /// Name of the wire.
        wire: String,
        /// The offending bit index.
        offset: u32,
        /// Width of the wire.
        width: u32,
    },

    /// A wire of width zero was declared.
    #[error("wire '{0}' has zero width")]
    EmptyWire(String),

    /// The netlist document could not be read.
    #[error("failed to read netlist: {0}")]
    Io(#[from] std::io::Error),

    /// The netlist document is not valid JSON for this format.
    #[error("failed to parse netlist: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_out_of_range() {
        let err = NetlistError::BitOutOfRange {
            wire: "data".into(),
            offset: 8,
            width: 8,
        };
        assert_eq!(
            err.to_string(),
            "bit 8 is out of range for wire 'data' of width 8"
        );
    }

    #[test]
    fn display_unknown_wire() {
        let err = NetlistError::UnknownWire(WireId::from_raw(9));
        assert_eq!(err.to_string(), "reference to unknown wire 9");
    }
}
