use alloy_primitives::{Address, U256};
use intent_multisig_core::IntentId;

/// Arguments of `createIntent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentRequest {
    /// Contract or account to call.
    pub target: Address,
    /// Wei sent from the multisig balance.
    pub value: U256,
    /// Calldata; empty for a plain transfer.
    pub payload: Vec<u8>,
}

/// Membership / quorum change, executed as an intent that targets the multisig itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GovernanceAction {
    AddOwner(Address),
    RemoveOwner(Address),
    SetRequiredApprovals(u64),
}

/// How a simulated external account reacts when an intent calls it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetBehaviour {
    /// Accept the call (and any value), returning `output`.
    Accept { output: Vec<u8> },
    /// Revert with `reason`.
    Revert { reason: Vec<u8> },
    /// Call back into the multisig as `msg.sender == target`, record the outcome, then succeed.
    Reenter { call: ReentryCall },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReentryCall {
    Approve(IntentId),
    Execute(IntentId),
}
