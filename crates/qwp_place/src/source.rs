//! The read-only view of a host design that the graph builder consumes.

use qwp_netlist::{ElementId, Netlist, SigBit};
use std::fmt::Debug;

/// A wire on the design boundary.
#[derive(Debug, Clone)]
pub struct BoundaryWire<B> {
    /// Wire name, used for alphabetical ordering.
    pub name: String,
    /// The wire is an input (or inout).
    pub is_input: bool,
    /// The wire is an output (or inout).
    pub is_output: bool,
    /// Raw bits of the wire.
    pub bits: Vec<B>,
}

/// A placeable element and the raw bits its terminals touch.
#[derive(Debug, Clone)]
pub struct PlaceableElement<K, B> {
    /// Host identity of the element, handed back with its coordinates.
    pub key: K,
    /// Display name for logs, diagnostics and output.
    pub name: String,
    /// Bits of all terminals, in terminal order.
    pub bits: Vec<B>,
}

/// A host design the placer can read.
///
/// Implementations expose the boundary wires, the selected elements and a
/// bit-equivalence resolver. Bits are grouped into nets by their canonical
/// representative, so `Bit` must be totally ordered for the grouping to be
/// deterministic.
pub trait PlacementSource {
    /// Host identity of an element.
    type Key: Copy + Debug;
    /// Raw signal bit.
    type Bit: Copy + Ord + Debug;

    /// All wires on the design boundary, in host order.
    fn boundary_wires(&self) -> Vec<BoundaryWire<Self::Bit>>;

    /// All elements selected for placement, in host order.
    fn placeable_elements(&self) -> Vec<PlaceableElement<Self::Key, Self::Bit>>;

    /// Maps a raw bit to its canonical representative.
    fn canonical_bit(&self, bit: Self::Bit) -> Self::Bit;

    /// Describes a bit for diagnostics.
    fn describe_bit(&self, bit: Self::Bit) -> String {
        format!("{bit:?}")
    }
}

impl PlacementSource for Netlist {
    type Key = ElementId;
    type Bit = SigBit;

    fn boundary_wires(&self) -> Vec<BoundaryWire<SigBit>> {
        self.ports()
            .map(|wire| BoundaryWire {
                name: wire.name.clone(),
                is_input: wire.is_input(),
                is_output: wire.is_output(),
                bits: self.wire_bits(wire.id),
            })
            .collect()
    }

    fn placeable_elements(&self) -> Vec<PlaceableElement<ElementId, SigBit>> {
        self.selected_elements()
            .map(|element| PlaceableElement {
                key: element.id,
                name: element.name.clone(),
                bits: element
                    .connections
                    .iter()
                    .flat_map(|conn| conn.bits.iter().copied())
                    .collect(),
            })
            .collect()
    }

    fn canonical_bit(&self, bit: SigBit) -> SigBit {
        self.sigmap().resolve(bit)
    }

    fn describe_bit(&self, bit: SigBit) -> String {
        self.bit_name(bit)
    }
}
