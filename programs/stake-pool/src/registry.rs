use crate::error::ErrorCode;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Stakeholder registry: descending sorted singly-linked chain over an arena
// ──────────────────────────────────────────────────────────────────────────────
//

/// Sentinel identity that anchors both ends of the chain. It is never a real
/// staker and never stored as a node; `next_of(GUARD)` is the best staker and
/// a node whose `next` is GUARD is the worst.
pub const GUARD: Pubkey = Pubkey::new_from_array([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1,
]);

/// One chain element. Nodes are addressed by the staker's wallet key, never by
/// their position in the arena, so the arena is free to reorder itself.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct StakerNode {
    /// Staker wallet this node belongs to.
    pub address: Pubkey,
    /// Ranking value (clear stake, in lamports).
    pub value: u64,
    /// Next staker in descending order, or GUARD for the worst.
    pub next: Pubkey,
}

/// Sorted registry of active stakers, embedded in the pool account.
///
/// The chain from GUARD is non-increasing in `value`; equal values rank a
/// later insert below an earlier one. A cached tail pointer keeps the worst
/// lookup O(1).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Registry {
    /// Best staker, or GUARD when empty.
    pub head: Pubkey,
    /// Worst staker, or GUARD when empty.
    pub tail: Pubkey,
    /// Node arena, unordered.
    pub nodes: Vec<StakerNode>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            head: GUARD,
            tail: GUARD,
            nodes: Vec::new(),
        }
    }

    /// Serialized size for a given node capacity (4-byte vec length prefix).
    pub const fn space(capacity: usize) -> usize {
        32 + 32 + 4 + capacity * StakerNode::INIT_SPACE
    }

    pub fn count(&self) -> u64 {
        self.nodes.len() as u64
    }

    pub fn contains(&self, address: &Pubkey) -> bool {
        self.index_of(address).is_some()
    }

    fn index_of(&self, address: &Pubkey) -> Option<usize> {
        self.nodes.iter().position(|n| n.address == *address)
    }

    fn node(&self, address: &Pubkey) -> Result<&StakerNode> {
        self.nodes
            .iter()
            .find(|n| n.address == *address)
            .ok_or(error!(ErrorCode::BrokenRegistryLink))
    }

    fn node_mut(&mut self, address: &Pubkey) -> Result<&mut StakerNode> {
        self.nodes
            .iter_mut()
            .find(|n| n.address == *address)
            .ok_or(error!(ErrorCode::BrokenRegistryLink))
    }

    /// Ranked value of a member, 0 for a non-member.
    pub fn value_of(&self, address: &Pubkey) -> u64 {
        self.nodes
            .iter()
            .find(|n| n.address == *address)
            .map(|n| n.value)
            .unwrap_or(0)
    }

    /// Successor in descending order. `next_of(GUARD)` is the best staker;
    /// the worst staker's successor is GUARD.
    pub fn next_of(&self, address: &Pubkey) -> Result<Pubkey> {
        if *address == GUARD {
            return Ok(self.head);
        }
        self.nodes
            .iter()
            .find(|n| n.address == *address)
            .map(|n| n.next)
            .ok_or(error!(ErrorCode::NotStakeholder))
    }

    /// Worst staker and its ranked value, or `(Pubkey::default(), 0)` when
    /// the registry is empty.
    pub fn worst(&self) -> (Pubkey, u64) {
        if self.tail == GUARD {
            return (Pubkey::default(), 0);
        }
        (self.tail, self.value_of(&self.tail))
    }

    /// Inserts a new staker at its rank.
    pub fn insert(&mut self, address: Pubkey, value: u64) -> Result<()> {
        require_keys_neq!(address, Pubkey::default(), ErrorCode::ZeroAddress);
        require_keys_neq!(address, GUARD, ErrorCode::GuardAddress);
        require!(!self.contains(&address), ErrorCode::AlreadyStakeholder);
        require!(value > 0, ErrorCode::ZeroValue);

        // Walk until the cursor ranks below the newcomer. Strict `>=` puts
        // equal values behind earlier inserts.
        let mut prev = GUARD;
        let mut cursor = self.head;
        let mut steps = 0usize;
        while cursor != GUARD {
            let node = self.node(&cursor)?;
            if node.value < value {
                break;
            }
            prev = cursor;
            cursor = node.next;
            steps += 1;
            require!(steps <= self.nodes.len(), ErrorCode::BrokenRegistryLink);
        }

        self.nodes.push(StakerNode {
            address,
            value,
            next: cursor,
        });
        if prev == GUARD {
            self.head = address;
        } else {
            self.node_mut(&prev)?.next = address;
        }
        if cursor == GUARD {
            self.tail = address;
        }
        Ok(())
    }

    /// Unlinks a staker and returns its ranked value.
    pub fn remove(&mut self, address: &Pubkey) -> Result<u64> {
        let idx = self
            .index_of(address)
            .ok_or(error!(ErrorCode::NotStakeholder))?;
        let removed = self.nodes[idx];

        // Find the predecessor in the chain.
        let mut prev = GUARD;
        let mut cursor = self.head;
        let mut steps = 0usize;
        while cursor != *address {
            require!(cursor != GUARD, ErrorCode::BrokenRegistryLink);
            prev = cursor;
            cursor = self.node(&cursor)?.next;
            steps += 1;
            require!(steps <= self.nodes.len(), ErrorCode::BrokenRegistryLink);
        }

        if prev == GUARD {
            self.head = removed.next;
        } else {
            self.node_mut(&prev)?.next = removed.next;
        }
        if self.tail == *address {
            self.tail = prev;
        }
        self.nodes.swap_remove(idx);
        Ok(removed.value)
    }

    /// Moves a member to the rank of its new value.
    pub fn reposition(&mut self, address: &Pubkey, value: u64) -> Result<()> {
        require!(value > 0, ErrorCode::ZeroValue);
        self.remove(address)?;
        self.insert(*address, value)
    }

    /// Full descending sequence of `(address, value)` pairs.
    pub fn snapshot(&self) -> Result<Vec<(Pubkey, u64)>> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while cursor != GUARD {
            let node = self.node(&cursor)?;
            out.push((node.address, node.value));
            cursor = node.next;
            require!(out.len() <= self.nodes.len(), ErrorCode::BrokenRegistryLink);
        }
        require!(out.len() == self.nodes.len(), ErrorCode::BrokenRegistryLink);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(byte: u8) -> Pubkey {
        let mut raw = [0u8; 32];
        raw[0] = byte;
        Pubkey::new_from_array(raw)
    }

    #[test]
    fn empty_registry_points_at_guard() {
        let reg = Registry::new();
        assert_eq!(reg.count(), 0);
        assert_eq!(reg.worst(), (Pubkey::default(), 0));
        assert_eq!(reg.next_of(&GUARD).unwrap(), GUARD);
    }

    #[test]
    fn insert_keeps_descending_order() {
        let mut reg = Registry::new();
        reg.insert(key(1), 50).unwrap();
        reg.insert(key(2), 200).unwrap();
        reg.insert(key(3), 100).unwrap();

        let snap = reg.snapshot().unwrap();
        assert_eq!(
            snap,
            vec![(key(2), 200), (key(3), 100), (key(1), 50)]
        );
        assert_eq!(reg.next_of(&GUARD).unwrap(), key(2));
        assert_eq!(reg.worst(), (key(1), 50));
    }

    #[test]
    fn equal_values_rank_later_insert_below() {
        let mut reg = Registry::new();
        reg.insert(key(1), 100).unwrap();
        reg.insert(key(2), 100).unwrap();
        reg.insert(key(3), 100).unwrap();

        let snap = reg.snapshot().unwrap();
        assert_eq!(
            snap,
            vec![(key(1), 100), (key(2), 100), (key(3), 100)]
        );
        assert_eq!(reg.worst().0, key(3));
    }

    #[test]
    fn insert_rejections() {
        let mut reg = Registry::new();
        assert!(reg.insert(Pubkey::default(), 10).is_err());
        assert!(reg.insert(GUARD, 10).is_err());
        assert!(reg.insert(key(1), 0).is_err());
        reg.insert(key(1), 10).unwrap();
        assert!(reg.insert(key(1), 20).is_err());
        assert_eq!(reg.count(), 1);
    }

    #[test]
    fn remove_relinks_and_updates_tail() {
        let mut reg = Registry::new();
        reg.insert(key(1), 300).unwrap();
        reg.insert(key(2), 200).unwrap();
        reg.insert(key(3), 100).unwrap();

        assert_eq!(reg.remove(&key(3)).unwrap(), 100);
        assert_eq!(reg.worst(), (key(2), 200));

        assert_eq!(reg.remove(&key(1)).unwrap(), 300);
        assert_eq!(reg.next_of(&GUARD).unwrap(), key(2));
        assert_eq!(reg.worst(), (key(2), 200));

        assert_eq!(reg.remove(&key(2)).unwrap(), 200);
        assert_eq!(reg.worst(), (Pubkey::default(), 0));
        assert_eq!(reg.next_of(&GUARD).unwrap(), GUARD);
    }

    #[test]
    fn remove_non_member_fails() {
        let mut reg = Registry::new();
        reg.insert(key(1), 10).unwrap();
        assert!(reg.remove(&key(2)).is_err());
        assert!(reg.next_of(&key(2)).is_err());
    }

    #[test]
    fn reposition_moves_member() {
        let mut reg = Registry::new();
        reg.insert(key(1), 300).unwrap();
        reg.insert(key(2), 200).unwrap();
        reg.insert(key(3), 100).unwrap();

        reg.reposition(&key(3), 250).unwrap();
        let snap = reg.snapshot().unwrap();
        assert_eq!(
            snap,
            vec![(key(1), 300), (key(3), 250), (key(2), 200)]
        );

        reg.reposition(&key(1), 150).unwrap();
        assert_eq!(reg.worst(), (key(1), 150));
    }

    proptest! {
        /// The chain always matches a model sorted by (value desc, insertion
        /// order asc), across an arbitrary interleaving of operations.
        #[test]
        fn chain_matches_sorted_model(ops in prop::collection::vec((0u8..3, 1u8..40, 1u64..1_000), 1..200)) {
            let mut reg = Registry::new();
            // model: (address, value, seq), seq increases per insert
            let mut model: Vec<(Pubkey, u64, usize)> = Vec::new();
            let mut seq = 0usize;

            for (op, who, value) in ops {
                let addr = key(who);
                let member = model.iter().any(|(a, _, _)| *a == addr);
                match op {
                    0 => {
                        if !member {
                            reg.insert(addr, value).unwrap();
                            model.push((addr, value, seq));
                            seq += 1;
                        }
                    }
                    1 => {
                        if member {
                            reg.remove(&addr).unwrap();
                            model.retain(|(a, _, _)| *a != addr);
                        }
                    }
                    _ => {
                        if member {
                            reg.reposition(&addr, value).unwrap();
                            model.retain(|(a, _, _)| *a != addr);
                            model.push((addr, value, seq));
                            seq += 1;
                        }
                    }
                }

                let mut expected = model.clone();
                expected.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
                let snap = reg.snapshot().unwrap();
                let want: Vec<(Pubkey, u64)> =
                    expected.iter().map(|(a, v, _)| (*a, *v)).collect();
                prop_assert_eq!(snap, want);
                prop_assert_eq!(reg.count() as usize, model.len());
                if let Some((a, v, _)) = expected.last() {
                    prop_assert_eq!(reg.worst(), (*a, *v));
                } else {
                    prop_assert_eq!(reg.worst(), (Pubkey::default(), 0));
                }
            }
        }
    }
}
