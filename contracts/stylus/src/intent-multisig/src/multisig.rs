//! Stylus entrypoint for the intent multisig.
//!
//! Design notes:
//! - Owners are the sole "who": only they create and approve intents.
//! - Execution is mechanical: anyone may call `executeIntent` once the quorum is met.
//! - Governance (`addOwner`, `removeOwner`, `setRequiredApprovals`) only accepts calls whose
//!   `msg.sender` is this contract, i.e. calls made while executing an approved intent.
//! - The target call goes through the host with a storage-bound `Call` context; the storage cache
//!   is flushed and cleared before it, so the nested frame sees `executed = true` and this frame
//!   sees whatever the nested frame wrote.

use alloc::vec::Vec;

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, U256},
    prelude::*,
    stylus_core::calls::{errors::Error as CallError, CallAccess, CallContext, MutatingCallContext},
};

use intent_multisig_core::{engine, narrow, registry, Intent, IntentId, Ledger, MultisigEvent};

use crate::errors::MultisigRevert;

sol_storage! {
    #[entrypoint]
    pub struct IntentMultisig {
        /// Membership flags; `owner_count` mirrors the number of `true` entries.
        mapping(address => bool) owners;
        uint256 owner_count;
        uint256 required_approvals;

        /// Highest allocated intent id. Ids start at 1.
        uint256 intent_count;
        mapping(uint256 => StoredIntent) intents;

        /// Set-once approval records per (intent id, owner).
        mapping(uint256 => mapping(address => bool)) approvals;
    }

    pub struct StoredIntent {
        address target;
        uint256 value;
        bytes payload;
        uint256 approval_count;
        bool executed;
    }
}

#[public]
impl IntentMultisig {
    /// Seed the owner set and quorum. Reverts unless `0 < required_approvals <= owners.len()`.
    #[constructor]
    pub fn constructor(
        &mut self,
        owners: Vec<Address>,
        required_approvals: U256,
    ) -> Result<(), MultisigRevert> {
        registry::initialize(self, &owners, narrow(required_approvals))?;
        Ok(())
    }

    /// Plain value transfers fund the multisig.
    #[receive]
    #[payable]
    pub fn receive(&mut self) -> Result<(), Vec<u8>> {
        let sender = self.vm().msg_sender();
        let value = self.vm().msg_value();
        self.emit(MultisigEvent::Deposit { sender, value });
        Ok(())
    }

    pub fn create_intent(
        &mut self,
        target: Address,
        value: U256,
        payload: Bytes,
    ) -> Result<U256, MultisigRevert> {
        let caller = self.vm().msg_sender();
        let intent_id = engine::create_intent(self, caller, target, value, payload.to_vec())?;
        Ok(U256::from(intent_id))
    }

    pub fn approve_intent(&mut self, intent_id: U256) -> Result<(), MultisigRevert> {
        let caller = self.vm().msg_sender();
        engine::approve_intent(self, caller, narrow(intent_id))?;
        Ok(())
    }

    /// Returns the target call's success flag and its return (or revert) data.
    pub fn execute_intent(&mut self, intent_id: U256) -> Result<(bool, Bytes), MultisigRevert> {
        let (success, data) = engine::execute_intent(self, narrow(intent_id))?;
        Ok((success, Bytes::from(data)))
    }

    pub fn set_required_approvals(&mut self, required: U256) -> Result<(), MultisigRevert> {
        let caller = self.vm().msg_sender();
        registry::set_required_approvals(self, caller, narrow(required))?;
        Ok(())
    }

    pub fn add_owner(&mut self, owner: Address) -> Result<(), MultisigRevert> {
        let caller = self.vm().msg_sender();
        registry::add_member(self, caller, owner)?;
        Ok(())
    }

    pub fn remove_owner(&mut self, owner: Address) -> Result<(), MultisigRevert> {
        let caller = self.vm().msg_sender();
        registry::remove_member(self, caller, owner)?;
        Ok(())
    }

    pub fn is_owner(&self, identity: Address) -> bool {
        registry::is_member(self, identity)
    }

    pub fn owner_count(&self) -> U256 {
        U256::from(Ledger::owner_count(self))
    }

    pub fn required_approvals(&self) -> U256 {
        U256::from(Ledger::required_approvals(self))
    }

    pub fn intent_count(&self) -> U256 {
        U256::from(Ledger::intent_count(self))
    }

    /// `(target, value, payload, approvalCount, executed)`.
    pub fn get_intent(
        &self,
        intent_id: U256,
    ) -> Result<(Address, U256, Bytes, U256, bool), MultisigRevert> {
        let intent = engine::intent(self, narrow(intent_id))?;
        Ok((
            intent.target,
            intent.value,
            Bytes::from(intent.payload),
            U256::from(intent.approval_count),
            intent.executed,
        ))
    }

    pub fn has_approved(&self, intent_id: U256, owner: Address) -> bool {
        engine::has_approved(self, narrow(intent_id), owner)
    }

    pub fn is_confirmed(&self, intent_id: U256) -> Result<bool, MultisigRevert> {
        Ok(engine::is_confirmed(self, narrow(intent_id))?)
    }
}

impl Ledger for IntentMultisig {
    fn self_address(&self) -> Address {
        self.vm().contract_address()
    }

    fn is_owner(&self, identity: Address) -> bool {
        self.owners.get(identity)
    }

    fn set_owner(&mut self, identity: Address, member: bool) {
        self.owners.insert(identity, member);
    }

    fn owner_count(&self) -> u64 {
        narrow(self.owner_count.get())
    }

    fn set_owner_count(&mut self, count: u64) {
        self.owner_count.set(U256::from(count));
    }

    fn required_approvals(&self) -> u64 {
        narrow(self.required_approvals.get())
    }

    fn set_required_approvals(&mut self, required: u64) {
        self.required_approvals.set(U256::from(required));
    }

    fn intent_count(&self) -> u64 {
        narrow(self.intent_count.get())
    }

    fn set_intent_count(&mut self, count: u64) {
        self.intent_count.set(U256::from(count));
    }

    fn intent(&self, id: IntentId) -> Intent {
        let stored = self.intents.getter(U256::from(id));
        Intent {
            target: stored.target.get(),
            value: stored.value.get(),
            payload: stored.payload.get_bytes(),
            approval_count: narrow(stored.approval_count.get()),
            executed: stored.executed.get(),
        }
    }

    fn insert_intent(&mut self, id: IntentId, intent: &Intent) {
        let mut stored = self.intents.setter(U256::from(id));
        stored.target.set(intent.target);
        stored.value.set(intent.value);
        stored.payload.set_bytes(&intent.payload);
        stored.approval_count.set(U256::from(intent.approval_count));
        stored.executed.set(intent.executed);
    }

    fn approval_count(&self, id: IntentId) -> u64 {
        narrow(self.intents.getter(U256::from(id)).approval_count.get())
    }

    fn set_approval_count(&mut self, id: IntentId, count: u64) {
        self.intents
            .setter(U256::from(id))
            .approval_count
            .set(U256::from(count));
    }

    fn is_executed(&self, id: IntentId) -> bool {
        self.intents.getter(U256::from(id)).executed.get()
    }

    fn set_executed(&mut self, id: IntentId, executed: bool) {
        self.intents.setter(U256::from(id)).executed.set(executed);
    }

    fn has_approved(&self, id: IntentId, owner: Address) -> bool {
        self.approvals.getter(U256::from(id)).get(owner)
    }

    fn record_approval(&mut self, id: IntentId, owner: Address) {
        self.approvals.setter(U256::from(id)).insert(owner, true);
    }

    fn invoke(&mut self, target: Address, value: U256, payload: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        // The host flushes pending writes (notably `executed = true`) and drops cached slots
        // before calling, so a reentrant frame and the reads after it see committed storage.
        self.vm()
            .call(&TargetCall { value }, target, payload)
            .map_err(|err| match err {
                CallError::Revert(data) => data,
                CallError::AbiDecodingFailed(_) => Vec::new(),
            })
    }

    fn emit(&mut self, event: MultisigEvent) {
        self.log_event(event);
    }
}

/// Context for the call an approved intent makes: all remaining gas and the intent's value.
struct TargetCall {
    value: U256,
}

impl CallContext for TargetCall {
    fn gas(&self) -> u64 {
        u64::MAX
    }
}

// SAFETY: a `TargetCall` only exists inside `Ledger::invoke`, which holds `&mut IntentMultisig`
// (the top-level storage) for the whole call, and the host flushes and clears the storage cache
// before handing control to the target.
unsafe impl MutatingCallContext for TargetCall {
    fn value(&self) -> U256 {
        self.value
    }
}
