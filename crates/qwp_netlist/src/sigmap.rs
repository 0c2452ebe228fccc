//! Bit-equivalence mapping.

use crate::bits::SigBit;
use std::collections::BTreeMap;

/// Maps raw signal bits to canonical representatives.
///
/// Bits joined by [`add`](Self::add) form one equivalence class (they are
/// the same electrical net). The representative of a class is its smallest
/// member in [`SigBit`] order, so a class containing a constant is always
/// represented by that constant. Bits never mentioned map to themselves.
#[derive(Debug, Clone, Default)]
pub struct SigMap {
    parent: BTreeMap<SigBit, SigBit>,
}

impl SigMap {
    /// Creates an empty map in which every bit is its own representative.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the classes of `a` and `b`.
    pub fn add(&mut self, a: SigBit, b: SigBit) {
        let ra = self.resolve(a);
        let rb = self.resolve(b);
        if ra == rb {
            return;
        }
        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent.insert(child, root);
        // Shorten the chains of the two original bits.
        if a != root {
            self.parent.insert(a, root);
        }
        if b != root {
            self.parent.insert(b, root);
        }
    }

    /// Returns the canonical representative of `bit`.
    pub fn resolve(&self, bit: SigBit) -> SigBit {
        let mut current = bit;
        while let Some(&next) = self.parent.get(&current) {
            current = next;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::Logic;
    use crate::ids::WireId;

    fn bit(w: u32, o: u32) -> SigBit {
        SigBit::wire(WireId::from_raw(w), o)
    }

    #[test]
    fn unmapped_bit_is_its_own_representative() {
        let map = SigMap::new();
        assert_eq!(map.resolve(bit(3, 1)), bit(3, 1));
    }

    #[test]
    fn alias_joins_classes() {
        let mut map = SigMap::new();
        map.add(bit(2, 0), bit(1, 0));
        assert_eq!(map.resolve(bit(1, 0)), map.resolve(bit(2, 0)));
        assert_eq!(map.resolve(bit(2, 0)), bit(1, 0));
    }

    #[test]
    fn transitive_aliases() {
        let mut map = SigMap::new();
        map.add(bit(5, 0), bit(4, 0));
        map.add(bit(4, 0), bit(3, 0));
        map.add(bit(9, 0), bit(5, 0));
        let rep = map.resolve(bit(9, 0));
        assert_eq!(rep, bit(3, 0));
        assert_eq!(map.resolve(bit(5, 0)), rep);
        assert_ne!(map.resolve(bit(3, 1)), rep);
    }

    #[test]
    fn constant_wins_representative() {
        let mut map = SigMap::new();
        map.add(bit(0, 0), bit(1, 0));
        map.add(bit(1, 0), SigBit::Const(Logic::One));
        assert_eq!(map.resolve(bit(0, 0)), SigBit::Const(Logic::One));
    }

    #[test]
    fn re_adding_same_class_is_noop() {
        let mut map = SigMap::new();
        map.add(bit(0, 0), bit(1, 0));
        map.add(bit(1, 0), bit(0, 0));
        assert_eq!(map.resolve(bit(1, 0)), bit(0, 0));
    }
}
