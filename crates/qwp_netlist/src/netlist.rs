//! The flat netlist: wires, elements, connections and aliases.

use crate::bits::SigBit;
use crate::error::NetlistError;
use crate::ids::{ElementId, WireId};
use crate::sigmap::SigMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// The direction of a boundary wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// Data flows into the module.
    Input,
    /// Data flows out of the module.
    Output,
    /// Bidirectional port.
    InOut,
}

/// A named multi-bit wire. Wires with a direction are module ports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    /// The unique ID of this wire (its index in [`Netlist::wires`]).
    #[serde(default = "placeholder_wire_id", skip_serializing)]
    pub id: WireId,
    /// Wire name, unique within the netlist.
    pub name: String,
    /// Number of bits.
    pub width: u32,
    /// Port direction, `None` for internal wires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<PortDirection>,
}

impl Wire {
    /// Returns `true` for input and inout ports.
    pub fn is_input(&self) -> bool {
        matches!(
            self.direction,
            Some(PortDirection::Input | PortDirection::InOut)
        )
    }

    /// Returns `true` for output and inout ports.
    pub fn is_output(&self) -> bool {
        matches!(
            self.direction,
            Some(PortDirection::Output | PortDirection::InOut)
        )
    }

    /// Returns `true` if the wire is on the module boundary.
    pub fn is_port(&self) -> bool {
        self.direction.is_some()
    }
}

/// A terminal of an element connected to a list of signal bits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Terminal name on the element (e.g. "A", "Y").
    pub port: String,
    /// The bits driven or read by the terminal, LSB first.
    pub bits: Vec<SigBit>,
}

/// A placeable element (a cell of the design).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// The unique ID of this element (its index in [`Netlist::elements`]).
    #[serde(default = "placeholder_element_id", skip_serializing)]
    pub id: ElementId,
    /// Instance name, unique within the netlist.
    pub name: String,
    /// Element type (e.g. "$and", "LUT4"). Informational only.
    #[serde(default)]
    pub kind: String,
    /// Whether the element takes part in placement.
    #[serde(default = "default_selected")]
    pub selected: bool,
    /// Terminal connections.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

fn placeholder_wire_id() -> WireId {
    WireId::from_raw(0)
}

fn placeholder_element_id() -> ElementId {
    ElementId::from_raw(0)
}

fn default_selected() -> bool {
    true
}

/// A flat module netlist.
///
/// IDs are assigned by position; the name indices and the [`SigMap`] are
/// derived data and are rebuilt by [`rebuild_indices`](Self::rebuild_indices)
/// after deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Netlist {
    /// Module name.
    pub name: String,
    /// All wires, ports included.
    #[serde(default)]
    pub wires: Vec<Wire>,
    /// All elements.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Pairs of bits that are the same net.
    #[serde(default)]
    pub aliases: Vec<(SigBit, SigBit)>,
    #[serde(skip)]
    wire_by_name: HashMap<String, WireId>,
    #[serde(skip)]
    element_by_name: HashMap<String, ElementId>,
    #[serde(skip)]
    sigmap: SigMap,
}

impl Netlist {
    /// Creates an empty netlist for the named module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wires: Vec::new(),
            elements: Vec::new(),
            aliases: Vec::new(),
            wire_by_name: HashMap::new(),
            element_by_name: HashMap::new(),
            sigmap: SigMap::new(),
        }
    }

    /// Adds a wire and returns its ID.
    pub fn add_wire(
        &mut self,
        name: impl Into<String>,
        width: u32,
        direction: Option<PortDirection>,
    ) -> Result<WireId, NetlistError> {
        let name = name.into();
        if width == 0 {
            return Err(NetlistError::EmptyWire(name));
        }
        if self.wire_by_name.contains_key(&name) {
            return Err(NetlistError::DuplicateName(name));
        }
        let id = WireId::from_raw(self.wires.len() as u32);
        self.wire_by_name.insert(name.clone(), id);
        self.wires.push(Wire {
            id,
            name,
            width,
            direction,
        });
        Ok(id)
    }

    /// Adds a selected element without connections and returns its ID.
    pub fn add_element(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<ElementId, NetlistError> {
        let name = name.into();
        if self.element_by_name.contains_key(&name) {
            return Err(NetlistError::DuplicateName(name));
        }
        let id = ElementId::from_raw(self.elements.len() as u32);
        self.element_by_name.insert(name.clone(), id);
        self.elements.push(Element {
            id,
            name,
            kind: kind.into(),
            selected: true,
            connections: Vec::new(),
        });
        Ok(id)
    }

    /// Connects a terminal of `element` to `bits`.
    pub fn connect(
        &mut self,
        element: ElementId,
        port: impl Into<String>,
        bits: Vec<SigBit>,
    ) -> Result<(), NetlistError> {
        for &bit in &bits {
            self.check_bit(bit)?;
        }
        self.elements[element.index()].connections.push(Connection {
            port: port.into(),
            bits,
        });
        Ok(())
    }

    /// Declares `a` and `b` to be the same net.
    pub fn alias(&mut self, a: SigBit, b: SigBit) -> Result<(), NetlistError> {
        self.check_bit(a)?;
        self.check_bit(b)?;
        self.aliases.push((a, b));
        self.sigmap.add(a, b);
        Ok(())
    }

    /// Returns every bit of a wire, LSB first.
    pub fn wire_bits(&self, id: WireId) -> Vec<SigBit> {
        (0..self.wire(id).width)
            .map(|offset| SigBit::wire(id, offset))
            .collect()
    }

    /// Returns the wire with the given ID.
    pub fn wire(&self, id: WireId) -> &Wire {
        &self.wires[id.index()]
    }

    /// Returns the element with the given ID.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    /// Returns a mutable reference to the element with the given ID.
    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.index()]
    }

    /// Looks up a wire by name.
    pub fn wire_by_name(&self, name: &str) -> Option<WireId> {
        self.wire_by_name.get(name).copied()
    }

    /// Looks up an element by name.
    pub fn element_by_name(&self, name: &str) -> Option<ElementId> {
        self.element_by_name.get(name).copied()
    }

    /// Iterates over the wires on the module boundary.
    pub fn ports(&self) -> impl Iterator<Item = &Wire> {
        self.wires.iter().filter(|w| w.is_port())
    }

    /// Iterates over the elements that take part in placement.
    pub fn selected_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.selected)
    }

    /// Returns the bit-equivalence map.
    pub fn sigmap(&self) -> &SigMap {
        &self.sigmap
    }

    /// Returns a human-readable name for a bit, e.g. `data[3]`.
    pub fn bit_name(&self, bit: SigBit) -> String {
        match bit {
            SigBit::Const(value) => format!("1'b{value}"),
            SigBit::Wire { wire, offset } => match self.wires.get(wire.index()) {
                Some(w) if w.width == 1 => w.name.clone(),
                Some(w) => format!("{}[{offset}]", w.name),
                None => format!("<wire {wire}>[{offset}]"),
            },
        }
    }

    /// Returns the number of elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the number of wires.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Reassigns positional IDs, rebuilds the name indices and the
    /// [`SigMap`], and validates every bit reference.
    pub fn rebuild_indices(&mut self) -> Result<(), NetlistError> {
        self.wire_by_name.clear();
        for (i, wire) in self.wires.iter_mut().enumerate() {
            wire.id = WireId::from_raw(i as u32);
            if wire.width == 0 {
                return Err(NetlistError::EmptyWire(wire.name.clone()));
            }
            if self
                .wire_by_name
                .insert(wire.name.clone(), wire.id)
                .is_some()
            {
                return Err(NetlistError::DuplicateName(wire.name.clone()));
            }
        }

        self.element_by_name.clear();
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.id = ElementId::from_raw(i as u32);
            if self
                .element_by_name
                .insert(element.name.clone(), element.id)
                .is_some()
            {
                return Err(NetlistError::DuplicateName(element.name.clone()));
            }
        }

        for element in &self.elements {
            for conn in &element.connections {
                for &bit in &conn.bits {
                    self.check_bit(bit)?;
                }
            }
        }

        self.sigmap = SigMap::new();
        for &(a, b) in &self.aliases {
            self.check_bit(a)?;
            self.check_bit(b)?;
            self.sigmap.add(a, b);
        }
        Ok(())
    }

    /// Parses a JSON netlist document and rebuilds its derived indices.
    pub fn from_json_str(content: &str) -> Result<Self, NetlistError> {
        let mut netlist: Netlist = serde_json::from_str(content)?;
        netlist.rebuild_indices()?;
        Ok(netlist)
    }

    /// Serializes the netlist as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, NetlistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_bit(&self, bit: SigBit) -> Result<(), NetlistError> {
        if let SigBit::Wire { wire, offset } = bit {
            let w = self
                .wires
                .get(wire.index())
                .ok_or(NetlistError::UnknownWire(wire))?;
            if offset >= w.width {
                return Err(NetlistError::BitOutOfRange {
                    wire: w.name.clone(),
                    offset,
                    width: w.width,
                });
            }
        }
        Ok(())
    }
}

/// Reads a JSON netlist document from disk.
pub fn load_netlist(path: &Path) -> Result<Netlist, NetlistError> {
    let content = std::fs::read_to_string(path)?;
    Netlist::from_json_str(&content)
}
