use alloc::vec::Vec;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolError;

use crate::{abi, intent::IntentId};

/// Errors raised by the registry and the intent engine.
///
/// Every variant aborts the invocation that produced it; no state is committed on the error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultisigError {
    /// Caller is not an owner.
    Unauthorized { caller: Address },
    /// Governance entry point invoked by anything other than the multisig itself.
    OnlySelf { caller: Address },
    /// Id 0, or an id above the highest allocated id.
    IntentNotFound { intent_id: IntentId },
    AlreadyExecuted { intent_id: IntentId },
    DuplicateApproval { intent_id: IntentId, owner: Address },
    QuorumNotMet { intent_id: IntentId, approvals: u64, required: u64 },
    /// Requested quorum is zero or larger than the owner set.
    InvalidQuorum { required: u64, owner_count: u64 },
    /// Removing an owner would leave fewer owners than the quorum.
    QuorumExceedsMembers { required: u64, owner_count: u64 },
    AlreadyMember { owner: Address },
    NotMember { owner: Address },
    /// The zero address can never be an owner.
    InvalidOwner { owner: Address },
}

/// Error sum types that can hold every custom Solidity error the multisig reverts with.
pub trait FromAbiError:
    From<abi::Unauthorized>
    + From<abi::OnlySelf>
    + From<abi::IntentNotFound>
    + From<abi::AlreadyExecuted>
    + From<abi::DuplicateApproval>
    + From<abi::QuorumNotMet>
    + From<abi::InvalidQuorum>
    + From<abi::QuorumExceedsMembers>
    + From<abi::AlreadyMember>
    + From<abi::NotMember>
    + From<abi::InvalidOwner>
{
}

impl<T> FromAbiError for T where
    T: From<abi::Unauthorized>
        + From<abi::OnlySelf>
        + From<abi::IntentNotFound>
        + From<abi::AlreadyExecuted>
        + From<abi::DuplicateApproval>
        + From<abi::QuorumNotMet>
        + From<abi::InvalidQuorum>
        + From<abi::QuorumExceedsMembers>
        + From<abi::AlreadyMember>
        + From<abi::NotMember>
        + From<abi::InvalidOwner>
{
}

/// Selector-prefixed revert data.
struct Encoded(Vec<u8>);

macro_rules! encoded_from {
    ($($error:ident),* $(,)?) => {
        $(
            impl From<abi::$error> for Encoded {
                fn from(err: abi::$error) -> Self {
                    Encoded(err.abi_encode())
                }
            }
        )*
    };
}

encoded_from!(
    Unauthorized,
    OnlySelf,
    IntentNotFound,
    AlreadyExecuted,
    DuplicateApproval,
    QuorumNotMet,
    InvalidQuorum,
    QuorumExceedsMembers,
    AlreadyMember,
    NotMember,
    InvalidOwner,
);

impl MultisigError {
    /// Widen into the matching `sol!` error; ids and counts become `uint256`.
    pub fn into_abi<R: FromAbiError>(self) -> R {
        match self {
            MultisigError::Unauthorized { caller } => abi::Unauthorized { caller }.into(),
            MultisigError::OnlySelf { caller } => abi::OnlySelf { caller }.into(),
            MultisigError::IntentNotFound { intent_id } => abi::IntentNotFound {
                intentId: U256::from(intent_id),
            }
            .into(),
            MultisigError::AlreadyExecuted { intent_id } => abi::AlreadyExecuted {
                intentId: U256::from(intent_id),
            }
            .into(),
            MultisigError::DuplicateApproval { intent_id, owner } => abi::DuplicateApproval {
                intentId: U256::from(intent_id),
                owner,
            }
            .into(),
            MultisigError::QuorumNotMet {
                intent_id,
                approvals,
                required,
            } => abi::QuorumNotMet {
                intentId: U256::from(intent_id),
                approvals: U256::from(approvals),
                required: U256::from(required),
            }
            .into(),
            MultisigError::InvalidQuorum {
                required,
                owner_count,
            } => abi::InvalidQuorum {
                required: U256::from(required),
                ownerCount: U256::from(owner_count),
            }
            .into(),
            MultisigError::QuorumExceedsMembers {
                required,
                owner_count,
            } => abi::QuorumExceedsMembers {
                required: U256::from(required),
                ownerCount: U256::from(owner_count),
            }
            .into(),
            MultisigError::AlreadyMember { owner } => abi::AlreadyMember { owner }.into(),
            MultisigError::NotMember { owner } => abi::NotMember { owner }.into(),
            MultisigError::InvalidOwner { owner } => abi::InvalidOwner { owner }.into(),
        }
    }

    /// ABI-encoded custom error (selector + args), as it appears in revert data.
    pub fn abi_encode(&self) -> Vec<u8> {
        self.into_abi::<Encoded>().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_data_starts_with_error_selector() {
        let err = MultisigError::QuorumNotMet {
            intent_id: 4,
            approvals: 1,
            required: 2,
        };
        let data = err.abi_encode();
        assert_eq!(data[..4], abi::QuorumNotMet::SELECTOR);

        let decoded = abi::QuorumNotMet::abi_decode(&data, true).unwrap();
        assert_eq!(decoded.intentId, U256::from(4));
        assert_eq!(decoded.required, U256::from(2));
    }
}
