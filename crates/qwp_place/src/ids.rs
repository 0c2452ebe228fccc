//! Index types local to the placer.

qwp_netlist::define_id!(
    /// Position of a placeable element in the list the placer was given.
    ///
    /// Graph nodes refer to elements through this slot rather than through
    /// the host's own key type, so the graph stays independent of the host.
    ElementSlot
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_roundtrip() {
        let slot = ElementSlot::from_raw(12);
        assert_eq!(slot.index(), 12);
        assert_eq!(slot.to_string(), "12");
    }
}
