//! Owner registry: membership set, owner count and quorum.
//!
//! Invariants held after every successful mutation:
//! - `0 < required_approvals <= owner_count`
//! - `owner_count` equals the number of addresses flagged as owners
//!
//! Every mutator validates fully before writing, so a rejected call leaves the ledger untouched.

use alloy_primitives::Address;

use crate::{errors::MultisigError, events::MultisigEvent, ledger::Ledger};

pub fn is_member<L: Ledger>(ledger: &L, identity: Address) -> bool {
    ledger.is_owner(identity)
}

/// Seed the owner set and quorum. Only meaningful on an empty ledger (contract constructor).
pub fn initialize<L: Ledger>(
    ledger: &mut L,
    owners: &[Address],
    required: u64,
) -> Result<(), MultisigError> {
    let mut seen = alloc::collections::BTreeSet::new();
    for owner in owners {
        if *owner == Address::ZERO {
            return Err(MultisigError::InvalidOwner { owner: *owner });
        }
        if !seen.insert(*owner) || ledger.is_owner(*owner) {
            return Err(MultisigError::AlreadyMember { owner: *owner });
        }
    }
    let owner_count = ledger.owner_count() + seen.len() as u64;
    check_quorum(required, owner_count)?;

    for owner in owners {
        ledger.set_owner(*owner, true);
        ledger.emit(MultisigEvent::OwnerAdded { owner: *owner });
    }
    ledger.set_owner_count(owner_count);
    ledger.set_required_approvals(required);
    ledger.emit(MultisigEvent::RequiredApprovalsChanged { required });
    Ok(())
}

pub fn add_member<L: Ledger>(
    ledger: &mut L,
    caller: Address,
    identity: Address,
) -> Result<(), MultisigError> {
    only_self(ledger, caller)?;
    if identity == Address::ZERO {
        return Err(MultisigError::InvalidOwner { owner: identity });
    }
    if ledger.is_owner(identity) {
        return Err(MultisigError::AlreadyMember { owner: identity });
    }

    ledger.set_owner(identity, true);
    ledger.set_owner_count(ledger.owner_count() + 1);
    ledger.emit(MultisigEvent::OwnerAdded { owner: identity });
    Ok(())
}

pub fn remove_member<L: Ledger>(
    ledger: &mut L,
    caller: Address,
    identity: Address,
) -> Result<(), MultisigError> {
    only_self(ledger, caller)?;
    if !ledger.is_owner(identity) {
        return Err(MultisigError::NotMember { owner: identity });
    }

    // Validate the shrunken set before committing anything.
    let remaining = ledger.owner_count().saturating_sub(1);
    let required = ledger.required_approvals();
    if required > remaining {
        return Err(MultisigError::QuorumExceedsMembers {
            required,
            owner_count: remaining,
        });
    }

    ledger.set_owner(identity, false);
    ledger.set_owner_count(remaining);
    ledger.emit(MultisigEvent::OwnerRemoved { owner: identity });
    Ok(())
}

pub fn set_required_approvals<L: Ledger>(
    ledger: &mut L,
    caller: Address,
    required: u64,
) -> Result<(), MultisigError> {
    only_self(ledger, caller)?;
    check_quorum(required, ledger.owner_count())?;

    ledger.set_required_approvals(required);
    ledger.emit(MultisigEvent::RequiredApprovalsChanged { required });
    Ok(())
}

/// Governance gate: the immediate caller must be the multisig itself, which only happens when an
/// executed intent targets one of its own entry points.
pub fn only_self<L: Ledger>(ledger: &L, caller: Address) -> Result<(), MultisigError> {
    if caller != ledger.self_address() {
        return Err(MultisigError::OnlySelf { caller });
    }
    Ok(())
}

pub fn only_owner<L: Ledger>(ledger: &L, caller: Address) -> Result<(), MultisigError> {
    if !ledger.is_owner(caller) {
        return Err(MultisigError::Unauthorized { caller });
    }
    Ok(())
}

fn check_quorum(required: u64, owner_count: u64) -> Result<(), MultisigError> {
    if required == 0 || required > owner_count {
        return Err(MultisigError::InvalidQuorum {
            required,
            owner_count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::{collections::BTreeSet, vec::Vec};

    use alloy_primitives::{Address, U256};

    use super::*;
    use crate::intent::{Intent, IntentId};

    const SELF: Address = Address::repeat_byte(0xEE);

    #[derive(Default)]
    struct RegistryOnly {
        owners: BTreeSet<Address>,
        owner_count: u64,
        required: u64,
        events: Vec<MultisigEvent>,
    }

    impl Ledger for RegistryOnly {
        fn self_address(&self) -> Address {
            SELF
        }
        fn is_owner(&self, identity: Address) -> bool {
            self.owners.contains(&identity)
        }
        fn set_owner(&mut self, identity: Address, member: bool) {
            if member {
                self.owners.insert(identity);
            } else {
                self.owners.remove(&identity);
            }
        }
        fn owner_count(&self) -> u64 {
            self.owner_count
        }
        fn set_owner_count(&mut self, count: u64) {
            self.owner_count = count;
        }
        fn required_approvals(&self) -> u64 {
            self.required
        }
        fn set_required_approvals(&mut self, required: u64) {
            self.required = required;
        }
        fn intent_count(&self) -> u64 {
            0
        }
        fn set_intent_count(&mut self, _count: u64) {}
        fn intent(&self, _id: IntentId) -> Intent {
            Intent::default()
        }
        fn insert_intent(&mut self, _id: IntentId, _intent: &Intent) {}
        fn approval_count(&self, _id: IntentId) -> u64 {
            0
        }
        fn set_approval_count(&mut self, _id: IntentId, _count: u64) {}
        fn is_executed(&self, _id: IntentId) -> bool {
            false
        }
        fn set_executed(&mut self, _id: IntentId, _executed: bool) {}
        fn has_approved(&self, _id: IntentId, _owner: Address) -> bool {
            false
        }
        fn record_approval(&mut self, _id: IntentId, _owner: Address) {}
        fn invoke(&mut self, _target: Address, _value: U256, _payload: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
            Err(Vec::new())
        }
        fn emit(&mut self, event: MultisigEvent) {
            self.events.push(event);
        }
    }

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    fn seeded(owners: &[Address], required: u64) -> RegistryOnly {
        let mut ledger = RegistryOnly::default();
        initialize(&mut ledger, owners, required).unwrap();
        ledger
    }

    fn assert_count_matches(ledger: &RegistryOnly) {
        assert_eq!(ledger.owner_count, ledger.owners.len() as u64);
        assert!(ledger.required > 0 && ledger.required <= ledger.owner_count);
    }

    #[test]
    fn initialize_sets_owners_and_quorum() {
        let ledger = seeded(&[addr(1), addr(2), addr(3)], 2);
        assert_eq!(ledger.owner_count, 3);
        assert_eq!(ledger.required, 2);
        assert!(is_member(&ledger, addr(2)));
        assert!(!is_member(&ledger, addr(4)));
        assert_eq!(
            ledger.events.last(),
            Some(&MultisigEvent::RequiredApprovalsChanged { required: 2 })
        );
        assert_count_matches(&ledger);
    }

    #[test]
    fn initialize_rejects_bad_input_without_writing() {
        let mut ledger = RegistryOnly::default();
        assert_eq!(
            initialize(&mut ledger, &[], 1),
            Err(MultisigError::InvalidQuorum { required: 1, owner_count: 0 })
        );
        assert_eq!(
            initialize(&mut ledger, &[addr(1), addr(2)], 3),
            Err(MultisigError::InvalidQuorum { required: 3, owner_count: 2 })
        );
        assert_eq!(
            initialize(&mut ledger, &[addr(1)], 0),
            Err(MultisigError::InvalidQuorum { required: 0, owner_count: 1 })
        );
        assert_eq!(
            initialize(&mut ledger, &[addr(1), addr(1)], 1),
            Err(MultisigError::AlreadyMember { owner: addr(1) })
        );
        assert_eq!(
            initialize(&mut ledger, &[addr(1), Address::ZERO], 1),
            Err(MultisigError::InvalidOwner { owner: Address::ZERO })
        );
        assert!(ledger.owners.is_empty());
        assert_eq!(ledger.owner_count, 0);
        assert!(ledger.events.is_empty());
    }

    #[test]
    fn governance_mutators_reject_external_callers() {
        let mut ledger = seeded(&[addr(1), addr(2)], 1);
        assert_eq!(
            add_member(&mut ledger, addr(1), addr(9)),
            Err(MultisigError::OnlySelf { caller: addr(1) })
        );
        assert_eq!(
            remove_member(&mut ledger, addr(1), addr(2)),
            Err(MultisigError::OnlySelf { caller: addr(1) })
        );
        assert_eq!(
            set_required_approvals(&mut ledger, addr(9), 2),
            Err(MultisigError::OnlySelf { caller: addr(9) })
        );
        assert_eq!(ledger.required, 1);
        assert_eq!(ledger.owner_count, 2);
    }

    #[test]
    fn add_and_remove_keep_count_in_sync() {
        let mut ledger = seeded(&[addr(1), addr(2)], 1);

        add_member(&mut ledger, SELF, addr(3)).unwrap();
        assert_eq!(ledger.owner_count, 3);
        assert_eq!(
            add_member(&mut ledger, SELF, addr(3)),
            Err(MultisigError::AlreadyMember { owner: addr(3) })
        );
        assert_eq!(
            add_member(&mut ledger, SELF, Address::ZERO),
            Err(MultisigError::InvalidOwner { owner: Address::ZERO })
        );

        remove_member(&mut ledger, SELF, addr(1)).unwrap();
        assert!(!is_member(&ledger, addr(1)));
        assert_eq!(
            remove_member(&mut ledger, SELF, addr(1)),
            Err(MultisigError::NotMember { owner: addr(1) })
        );
        assert_count_matches(&ledger);
    }

    #[test]
    fn removal_below_quorum_is_rejected_atomically() {
        let mut ledger = seeded(&[addr(1), addr(2)], 2);
        assert_eq!(
            remove_member(&mut ledger, SELF, addr(2)),
            Err(MultisigError::QuorumExceedsMembers { required: 2, owner_count: 1 })
        );
        assert!(is_member(&ledger, addr(2)));
        assert_eq!(ledger.owner_count, 2);
    }

    #[test]
    fn last_owner_cannot_be_removed() {
        let mut ledger = seeded(&[addr(1)], 1);
        assert_eq!(
            remove_member(&mut ledger, SELF, addr(1)),
            Err(MultisigError::QuorumExceedsMembers { required: 1, owner_count: 0 })
        );
        assert_count_matches(&ledger);
    }

    #[test]
    fn quorum_bounds_follow_owner_count() {
        let mut ledger = seeded(&[addr(1), addr(2), addr(3)], 1);
        set_required_approvals(&mut ledger, SELF, 3).unwrap();
        assert_eq!(ledger.required, 3);
        assert_eq!(
            set_required_approvals(&mut ledger, SELF, 4),
            Err(MultisigError::InvalidQuorum { required: 4, owner_count: 3 })
        );
        assert_eq!(
            set_required_approvals(&mut ledger, SELF, 0),
            Err(MultisigError::InvalidQuorum { required: 0, owner_count: 3 })
        );
        assert_eq!(ledger.required, 3);
    }
}
