//! Storage and host abstraction for the multisig state machine.
//!
//! Implemented on-chain by the Stylus contract (sol_storage + host calls) and off-chain by the
//! in-memory simulator used in tooling and tests.

use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

use crate::{
    events::MultisigEvent,
    intent::{Intent, IntentId},
};

pub trait Ledger {
    /// Address of the multisig itself; the only identity allowed to call governance mutators.
    fn self_address(&self) -> Address;

    fn is_owner(&self, identity: Address) -> bool;
    fn set_owner(&mut self, identity: Address, member: bool);

    fn owner_count(&self) -> u64;
    fn set_owner_count(&mut self, count: u64);

    fn required_approvals(&self) -> u64;
    fn set_required_approvals(&mut self, required: u64);

    /// Highest allocated intent id (0 when no intent exists).
    fn intent_count(&self) -> u64;
    fn set_intent_count(&mut self, count: u64);

    /// Full intent record. Callers check the id against [`Ledger::intent_count`] first.
    fn intent(&self, id: IntentId) -> Intent;
    fn insert_intent(&mut self, id: IntentId, intent: &Intent);

    fn approval_count(&self, id: IntentId) -> u64;
    fn set_approval_count(&mut self, id: IntentId, count: u64);

    fn is_executed(&self, id: IntentId) -> bool;
    fn set_executed(&mut self, id: IntentId, executed: bool);

    fn has_approved(&self, id: IntentId, owner: Address) -> bool;
    fn record_approval(&mut self, id: IntentId, owner: Address);

    /// Call `target` with `value` attached and `payload` as calldata.
    ///
    /// Returns the return data on success and the revert data on failure. The call may re-enter
    /// the multisig; implementations must make state written before the call visible to the nested
    /// frame, and state written by the nested frame visible afterwards.
    fn invoke(&mut self, target: Address, value: U256, payload: &[u8]) -> Result<Vec<u8>, Vec<u8>>;

    fn emit(&mut self, event: MultisigEvent);
}
