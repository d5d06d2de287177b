//! Revert types returned from the public ABI.

use intent_multisig_core::{abi, MultisigError};
use stylus_sdk::stylus_proc::SolidityError;

/// Custom Solidity errors surfaced to callers.
#[derive(SolidityError, Debug)]
pub enum MultisigRevert {
    Unauthorized(abi::Unauthorized),
    OnlySelf(abi::OnlySelf),
    IntentNotFound(abi::IntentNotFound),
    AlreadyExecuted(abi::AlreadyExecuted),
    DuplicateApproval(abi::DuplicateApproval),
    QuorumNotMet(abi::QuorumNotMet),
    InvalidQuorum(abi::InvalidQuorum),
    QuorumExceedsMembers(abi::QuorumExceedsMembers),
    AlreadyMember(abi::AlreadyMember),
    NotMember(abi::NotMember),
    InvalidOwner(abi::InvalidOwner),
}

impl From<MultisigError> for MultisigRevert {
    fn from(err: MultisigError) -> Self {
        err.into_abi()
    }
}
