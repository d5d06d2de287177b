use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, SolError};
use intent_multisig_core::{
    abi::{self, IIntentMultisig},
    IntentId, MultisigError,
};

use crate::types::{GovernanceAction, IntentRequest};

/// Calldata for a governance entry point (the payload of a self-targeted intent).
pub fn encode_governance(action: &GovernanceAction) -> Vec<u8> {
    match *action {
        GovernanceAction::AddOwner(owner) => IIntentMultisig::addOwnerCall { owner }.abi_encode(),
        GovernanceAction::RemoveOwner(owner) => {
            IIntentMultisig::removeOwnerCall { owner }.abi_encode()
        }
        GovernanceAction::SetRequiredApprovals(required) => {
            IIntentMultisig::setRequiredApprovalsCall {
                required: U256::from(required),
            }
            .abi_encode()
        }
    }
}

/// Intent that applies `action` to the multisig deployed at `multisig`.
pub fn governance_intent(multisig: Address, action: &GovernanceAction) -> IntentRequest {
    IntentRequest {
        target: multisig,
        value: U256::ZERO,
        payload: encode_governance(action),
    }
}

pub fn transfer_intent(recipient: Address, value: U256) -> IntentRequest {
    IntentRequest {
        target: recipient,
        value,
        payload: Vec::new(),
    }
}

pub fn encode_create_intent(request: &IntentRequest) -> Vec<u8> {
    IIntentMultisig::createIntentCall {
        target: request.target,
        value: request.value,
        payload: request.payload.clone().into(),
    }
    .abi_encode()
}

pub fn encode_approve_intent(intent_id: IntentId) -> Vec<u8> {
    IIntentMultisig::approveIntentCall {
        intentId: U256::from(intent_id),
    }
    .abi_encode()
}

pub fn encode_execute_intent(intent_id: IntentId) -> Vec<u8> {
    IIntentMultisig::executeIntentCall {
        intentId: U256::from(intent_id),
    }
    .abi_encode()
}

/// `0x`-prefixed hex, as accepted by `cast send` and friends.
pub fn calldata_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Map revert data back onto the multisig error it encodes, if any.
pub fn decode_revert(data: &[u8]) -> Option<MultisigError> {
    if let Some(e) = try_decode::<abi::Unauthorized>(data) {
        return Some(MultisigError::Unauthorized { caller: e.caller });
    }
    if let Some(e) = try_decode::<abi::OnlySelf>(data) {
        return Some(MultisigError::OnlySelf { caller: e.caller });
    }
    if let Some(e) = try_decode::<abi::IntentNotFound>(data) {
        return Some(MultisigError::IntentNotFound {
            intent_id: to_u64(e.intentId)?,
        });
    }
    if let Some(e) = try_decode::<abi::AlreadyExecuted>(data) {
        return Some(MultisigError::AlreadyExecuted {
            intent_id: to_u64(e.intentId)?,
        });
    }
    if let Some(e) = try_decode::<abi::DuplicateApproval>(data) {
        return Some(MultisigError::DuplicateApproval {
            intent_id: to_u64(e.intentId)?,
            owner: e.owner,
        });
    }
    if let Some(e) = try_decode::<abi::QuorumNotMet>(data) {
        return Some(MultisigError::QuorumNotMet {
            intent_id: to_u64(e.intentId)?,
            approvals: to_u64(e.approvals)?,
            required: to_u64(e.required)?,
        });
    }
    if let Some(e) = try_decode::<abi::InvalidQuorum>(data) {
        return Some(MultisigError::InvalidQuorum {
            required: to_u64(e.required)?,
            owner_count: to_u64(e.ownerCount)?,
        });
    }
    if let Some(e) = try_decode::<abi::QuorumExceedsMembers>(data) {
        return Some(MultisigError::QuorumExceedsMembers {
            required: to_u64(e.required)?,
            owner_count: to_u64(e.ownerCount)?,
        });
    }
    if let Some(e) = try_decode::<abi::AlreadyMember>(data) {
        return Some(MultisigError::AlreadyMember { owner: e.owner });
    }
    if let Some(e) = try_decode::<abi::NotMember>(data) {
        return Some(MultisigError::NotMember { owner: e.owner });
    }
    if let Some(e) = try_decode::<abi::InvalidOwner>(data) {
        return Some(MultisigError::InvalidOwner { owner: e.owner });
    }
    None
}

fn try_decode<E: SolError>(data: &[u8]) -> Option<E> {
    if data.get(..4)? != E::SELECTOR.as_slice() {
        return None;
    }
    E::abi_decode(data, true).ok()
}

fn to_u64(value: U256) -> Option<u64> {
    u64::try_from(value).ok()
}
