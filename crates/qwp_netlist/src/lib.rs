//! Host design representation consumed by the placer.
//!
//! A [`Netlist`] is a flat module: boundary [`Wire`]s with port directions,
//! placeable [`Element`]s whose terminals connect to signal bits, and a set of
//! bit aliases. The [`SigMap`] built from those aliases maps every raw
//! [`SigBit`] to its canonical representative, so two terminals touch the same
//! net exactly when their bits map to the same canonical bit.
//!
//! Netlists are serde-serializable; the CLI reads them as JSON documents.

#![warn(missing_docs)]

pub mod bits;
pub mod error;
pub mod ids;
pub mod netlist;
pub mod sigmap;

pub use bits::{Logic, SigBit};
pub use error::NetlistError;
pub use ids::{ElementId, WireId};
pub use netlist::{load_netlist, Connection, Element, Netlist, PortDirection, Wire};
pub use sigmap::SigMap;
