use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

use crate::intent::IntentId;

/// State transitions reported through [`crate::Ledger::emit`].
///
/// The contract maps these onto Solidity events; the in-memory ledger keeps them as a log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultisigEvent {
    Deposit {
        sender: Address,
        value: U256,
    },
    IntentCreated {
        intent_id: IntentId,
        creator: Address,
        target: Address,
        value: U256,
        payload: Vec<u8>,
    },
    IntentApproved {
        intent_id: IntentId,
        owner: Address,
        approvals: u64,
    },
    IntentExecuted {
        intent_id: IntentId,
        result: Vec<u8>,
    },
    /// The target call reverted; the intent is executable again.
    IntentExecutionFailed {
        intent_id: IntentId,
        reason: Vec<u8>,
    },
    OwnerAdded {
        owner: Address,
    },
    OwnerRemoved {
        owner: Address,
    },
    RequiredApprovalsChanged {
        required: u64,
    },
}
