//! In-memory ledger for off-chain simulation of the multisig.
//!
//! Mirrors the on-chain semantics the contract relies on:
//! - every entry point is all-or-nothing (state is restored when it returns an error);
//! - every call frame opened by an intent is all-or-nothing (state is restored when the target
//!   reverts, including anything a nested self-call changed);
//! - calls to the multisig's own address are decoded and dispatched back into the engine with
//!   `msg.sender == multisig`, exactly like the reentrant host call on-chain.

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolInterface, SolValue};
use intent_multisig_core::{
    abi::IIntentMultisig::IIntentMultisigCalls, engine, narrow, registry, Intent, IntentId,
    Ledger, MultisigError, MultisigEvent,
};

use crate::types::{ReentryCall, TargetBehaviour};

const INSUFFICIENT_BALANCE: &[u8] = b"insufficient balance";

/// Everything a reverted frame must roll back.
#[derive(Clone, Debug, Default)]
struct State {
    owners: BTreeSet<Address>,
    owner_count: u64,
    required_approvals: u64,
    intent_count: u64,
    intents: BTreeMap<IntentId, Intent>,
    approvals: BTreeSet<(IntentId, Address)>,
    balances: BTreeMap<Address, U256>,
    events: Vec<MultisigEvent>,
}

/// Outcome of a call a [`TargetBehaviour::Reenter`] target made back into the multisig.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReentryOutcome {
    pub target: Address,
    pub call: ReentryCall,
    pub result: Result<(), MultisigError>,
}

pub struct MemoryLedger {
    address: Address,
    state: State,
    targets: BTreeMap<Address, TargetBehaviour>,
    reentries: Vec<ReentryOutcome>,
}

impl MemoryLedger {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            state: State::default(),
            targets: BTreeMap::new(),
            reentries: Vec::new(),
        }
    }

    /// Equivalent of deploying the contract with constructor args `(owners, required)`.
    pub fn deploy(
        address: Address,
        owners: &[Address],
        required: u64,
    ) -> Result<Self, MultisigError> {
        let mut ledger = Self::new(address);
        registry::initialize(&mut ledger, owners, required)?;
        Ok(ledger)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Plain value transfer into the multisig (the `receive` path).
    pub fn deposit(&mut self, sender: Address, value: U256) {
        self.credit(self.address, value);
        self.emit(MultisigEvent::Deposit { sender, value });
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.state
            .balances
            .get(&account)
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn set_target(&mut self, target: Address, behaviour: TargetBehaviour) {
        self.targets.insert(target, behaviour);
    }

    pub fn events(&self) -> &[MultisigEvent] {
        &self.state.events
    }

    pub fn reentries(&self) -> &[ReentryOutcome] {
        &self.reentries
    }

    /// Number of approval records for `intent_id`, counted independently of `approval_count`.
    pub fn approval_records(&self, intent_id: IntentId) -> u64 {
        self.state
            .approvals
            .iter()
            .filter(|(id, _)| *id == intent_id)
            .count() as u64
    }

    pub fn create_intent(
        &mut self,
        caller: Address,
        target: Address,
        value: U256,
        payload: Vec<u8>,
    ) -> Result<IntentId, MultisigError> {
        self.transact(|ledger| engine::create_intent(ledger, caller, target, value, payload))
    }

    pub fn approve_intent(
        &mut self,
        caller: Address,
        intent_id: IntentId,
    ) -> Result<(), MultisigError> {
        self.transact(|ledger| engine::approve_intent(ledger, caller, intent_id))
    }

    pub fn execute_intent(&mut self, intent_id: IntentId) -> Result<(bool, Vec<u8>), MultisigError> {
        self.transact(|ledger| engine::execute_intent(ledger, intent_id))
    }

    pub fn add_owner(&mut self, caller: Address, owner: Address) -> Result<(), MultisigError> {
        self.transact(|ledger| registry::add_member(ledger, caller, owner))
    }

    pub fn remove_owner(&mut self, caller: Address, owner: Address) -> Result<(), MultisigError> {
        self.transact(|ledger| registry::remove_member(ledger, caller, owner))
    }

    pub fn set_quorum(&mut self, caller: Address, required: u64) -> Result<(), MultisigError> {
        self.transact(|ledger| registry::set_required_approvals(ledger, caller, required))
    }

    pub fn get_intent(&self, intent_id: IntentId) -> Result<Intent, MultisigError> {
        engine::intent(self, intent_id)
    }

    fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, MultisigError>,
    ) -> Result<T, MultisigError> {
        let snapshot = self.state.clone();
        let result = f(self);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    fn credit(&mut self, account: Address, value: U256) {
        let balance = self.balance_of(account);
        self.state
            .balances
            .insert(account, balance.saturating_add(value));
    }

    fn move_value(&mut self, to: Address, value: U256) -> Result<(), Vec<u8>> {
        if value.is_zero() {
            return Ok(());
        }
        let from = self.balance_of(self.address);
        if from < value {
            return Err(INSUFFICIENT_BALANCE.to_vec());
        }
        self.state.balances.insert(self.address, from - value);
        self.credit(to, value);
        Ok(())
    }

    fn call_frame(
        &mut self,
        target: Address,
        value: U256,
        payload: &[u8],
    ) -> Result<Vec<u8>, Vec<u8>> {
        self.move_value(target, value)?;

        if target == self.address {
            if payload.is_empty() {
                self.emit(MultisigEvent::Deposit {
                    sender: self.address,
                    value,
                });
                return Ok(Vec::new());
            }
            return self.self_call(payload);
        }

        match self.targets.get(&target).cloned() {
            None => Ok(Vec::new()),
            Some(TargetBehaviour::Accept { output }) => Ok(output),
            Some(TargetBehaviour::Revert { reason }) => Err(reason),
            Some(TargetBehaviour::Reenter { call }) => {
                let result = match call {
                    ReentryCall::Approve(intent_id) => {
                        engine::approve_intent(self, target, intent_id)
                    }
                    ReentryCall::Execute(intent_id) => {
                        engine::execute_intent(self, intent_id).map(|_| ())
                    }
                };
                self.reentries.push(ReentryOutcome {
                    target,
                    call,
                    result,
                });
                Ok(Vec::new())
            }
        }
    }

    /// ABI router for calls the multisig makes to itself.
    fn self_call(&mut self, payload: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        let call = IIntentMultisigCalls::abi_decode(payload, true).map_err(|_| Vec::new())?;
        let caller = self.address;
        let output = match call {
            IIntentMultisigCalls::createIntent(c) => {
                engine::create_intent(self, caller, c.target, c.value, c.payload.to_vec())
                    .map(|id| U256::from(id).abi_encode())
            }
            IIntentMultisigCalls::approveIntent(c) => {
                engine::approve_intent(self, caller, narrow(c.intentId)).map(|()| Vec::new())
            }
            IIntentMultisigCalls::executeIntent(c) => engine::execute_intent(self, narrow(c.intentId))
                .map(|(success, data)| (success, Bytes::from(data)).abi_encode_params()),
            IIntentMultisigCalls::setRequiredApprovals(c) => {
                registry::set_required_approvals(self, caller, narrow(c.required))
                    .map(|()| Vec::new())
            }
            IIntentMultisigCalls::addOwner(c) => {
                registry::add_member(self, caller, c.owner).map(|()| Vec::new())
            }
            IIntentMultisigCalls::removeOwner(c) => {
                registry::remove_member(self, caller, c.owner).map(|()| Vec::new())
            }
            IIntentMultisigCalls::isOwner(c) => Ok(self.is_owner(c.identity).abi_encode()),
            IIntentMultisigCalls::ownerCount(_) => Ok(U256::from(self.owner_count()).abi_encode()),
            IIntentMultisigCalls::requiredApprovals(_) => {
                Ok(U256::from(self.required_approvals()).abi_encode())
            }
            IIntentMultisigCalls::intentCount(_) => Ok(U256::from(self.intent_count()).abi_encode()),
            IIntentMultisigCalls::getIntent(c) => engine::intent(self, narrow(c.intentId)).map(|i| {
                (
                    i.target,
                    i.value,
                    Bytes::from(i.payload),
                    U256::from(i.approval_count),
                    i.executed,
                )
                    .abi_encode_params()
            }),
            IIntentMultisigCalls::hasApproved(c) => {
                Ok(engine::has_approved(self, narrow(c.intentId), c.owner).abi_encode())
            }
            IIntentMultisigCalls::isConfirmed(c) => {
                engine::is_confirmed(self, narrow(c.intentId)).map(|ok| ok.abi_encode())
            }
        };
        output.map_err(|err| err.abi_encode())
    }
}

impl Ledger for MemoryLedger {
    fn self_address(&self) -> Address {
        self.address
    }

    fn is_owner(&self, identity: Address) -> bool {
        self.state.owners.contains(&identity)
    }

    fn set_owner(&mut self, identity: Address, member: bool) {
        if member {
            self.state.owners.insert(identity);
        } else {
            self.state.owners.remove(&identity);
        }
    }

    fn owner_count(&self) -> u64 {
        self.state.owner_count
    }

    fn set_owner_count(&mut self, count: u64) {
        self.state.owner_count = count;
    }

    fn required_approvals(&self) -> u64 {
        self.state.required_approvals
    }

    fn set_required_approvals(&mut self, required: u64) {
        self.state.required_approvals = required;
    }

    fn intent_count(&self) -> u64 {
        self.state.intent_count
    }

    fn set_intent_count(&mut self, count: u64) {
        self.state.intent_count = count;
    }

    fn intent(&self, id: IntentId) -> Intent {
        self.state.intents.get(&id).cloned().unwrap_or_default()
    }

    fn insert_intent(&mut self, id: IntentId, intent: &Intent) {
        self.state.intents.insert(id, intent.clone());
    }

    fn approval_count(&self, id: IntentId) -> u64 {
        self.state
            .intents
            .get(&id)
            .map(|intent| intent.approval_count)
            .unwrap_or(0)
    }

    fn set_approval_count(&mut self, id: IntentId, count: u64) {
        if let Some(intent) = self.state.intents.get_mut(&id) {
            intent.approval_count = count;
        }
    }

    fn is_executed(&self, id: IntentId) -> bool {
        self.state
            .intents
            .get(&id)
            .map(|intent| intent.executed)
            .unwrap_or(false)
    }

    fn set_executed(&mut self, id: IntentId, executed: bool) {
        if let Some(intent) = self.state.intents.get_mut(&id) {
            intent.executed = executed;
        }
    }

    fn has_approved(&self, id: IntentId, owner: Address) -> bool {
        self.state.approvals.contains(&(id, owner))
    }

    fn record_approval(&mut self, id: IntentId, owner: Address) {
        self.state.approvals.insert((id, owner));
    }

    fn invoke(&mut self, target: Address, value: U256, payload: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        let snapshot = self.state.clone();
        let result = self.call_frame(target, value, payload);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    fn emit(&mut self, event: MultisigEvent) {
        self.state.events.push(event);
    }
}
