//! Solidity events emitted by the multisig.

use alloy_sol_types::sol;
use intent_multisig_core::MultisigEvent;
use stylus_sdk::{alloy_primitives::U256, prelude::*, stylus_core::log};

use crate::multisig::IntentMultisig;

sol! {
    event Deposit(address indexed sender, uint256 value);
    event IntentCreated(uint256 indexed intentId, address indexed creator, address indexed target, uint256 value, bytes payload);
    event IntentApproved(uint256 indexed intentId, address indexed owner, uint256 approvals);
    event IntentExecuted(uint256 indexed intentId, bytes result);
    event IntentExecutionFailed(uint256 indexed intentId, bytes reason);
    event OwnerAdded(address indexed owner);
    event OwnerRemoved(address indexed owner);
    event RequiredApprovalsChanged(uint256 required);
}

impl IntentMultisig {
    pub(crate) fn log_event(&self, event: MultisigEvent) {
        let vm = self.vm();
        match event {
            MultisigEvent::Deposit { sender, value } => log(vm, Deposit { sender, value }),
            MultisigEvent::IntentCreated {
                intent_id,
                creator,
                target,
                value,
                payload,
            } => log(
                vm,
                IntentCreated {
                    intentId: U256::from(intent_id),
                    creator,
                    target,
                    value,
                    payload: payload.into(),
                },
            ),
            MultisigEvent::IntentApproved {
                intent_id,
                owner,
                approvals,
            } => log(
                vm,
                IntentApproved {
                    intentId: U256::from(intent_id),
                    owner,
                    approvals: U256::from(approvals),
                },
            ),
            MultisigEvent::IntentExecuted { intent_id, result } => log(
                vm,
                IntentExecuted {
                    intentId: U256::from(intent_id),
                    result: result.into(),
                },
            ),
            MultisigEvent::IntentExecutionFailed { intent_id, reason } => log(
                vm,
                IntentExecutionFailed {
                    intentId: U256::from(intent_id),
                    reason: reason.into(),
                },
            ),
            MultisigEvent::OwnerAdded { owner } => log(vm, OwnerAdded { owner }),
            MultisigEvent::OwnerRemoved { owner } => log(vm, OwnerRemoved { owner }),
            MultisigEvent::RequiredApprovalsChanged { required } => log(
                vm,
                RequiredApprovalsChanged {
                    required: U256::from(required),
                },
            ),
        }
    }
}
