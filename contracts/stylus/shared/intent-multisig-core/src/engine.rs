//! Intent lifecycle: Created -> Approved* -> Executed.
//!
//! A failed target call moves the intent back to its pre-execution state (approvals intact), so the
//! intent stays executable.

use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

use crate::{
    errors::MultisigError,
    events::MultisigEvent,
    intent::{Intent, IntentId},
    ledger::Ledger,
    registry::only_owner,
};

/// Create an intent on behalf of `caller`, who is recorded as its first approver.
///
/// With a quorum of one the intent is executed before returning. A failed execution does not fail
/// creation: the intent is left unexecuted and can be retried through [`execute_intent`].
pub fn create_intent<L: Ledger>(
    ledger: &mut L,
    caller: Address,
    target: Address,
    value: U256,
    payload: Vec<u8>,
) -> Result<IntentId, MultisigError> {
    only_owner(ledger, caller)?;

    let intent_id = ledger.intent_count() + 1;
    let intent = Intent {
        target,
        value,
        payload,
        approval_count: 1,
        executed: false,
    };
    ledger.insert_intent(intent_id, &intent);
    ledger.record_approval(intent_id, caller);
    ledger.set_intent_count(intent_id);

    ledger.emit(MultisigEvent::IntentCreated {
        intent_id,
        creator: caller,
        target,
        value,
        payload: intent.payload,
    });
    ledger.emit(MultisigEvent::IntentApproved {
        intent_id,
        owner: caller,
        approvals: 1,
    });

    if intent.approval_count >= ledger.required_approvals() {
        execute_intent(ledger, intent_id)?;
    }
    Ok(intent_id)
}

/// Record `caller`'s approval and execute once the quorum is reached.
pub fn approve_intent<L: Ledger>(
    ledger: &mut L,
    caller: Address,
    intent_id: IntentId,
) -> Result<(), MultisigError> {
    only_owner(ledger, caller)?;
    ensure_exists(ledger, intent_id)?;
    if ledger.is_executed(intent_id) {
        return Err(MultisigError::AlreadyExecuted { intent_id });
    }
    if ledger.has_approved(intent_id, caller) {
        return Err(MultisigError::DuplicateApproval {
            intent_id,
            owner: caller,
        });
    }

    let approvals = ledger.approval_count(intent_id) + 1;
    ledger.record_approval(intent_id, caller);
    ledger.set_approval_count(intent_id, approvals);
    ledger.emit(MultisigEvent::IntentApproved {
        intent_id,
        owner: caller,
        approvals,
    });

    if approvals >= ledger.required_approvals() {
        execute_intent(ledger, intent_id)?;
    }
    Ok(())
}

/// Execute an intent that has reached quorum. Callable by anyone.
///
/// `executed` is written before the target is called, so a nested call back into the multisig
/// for the same intent sees it as executed. The flag is cleared again only when the target call
/// itself fails; the call's success flag and return (or revert) data are returned either way.
pub fn execute_intent<L: Ledger>(
    ledger: &mut L,
    intent_id: IntentId,
) -> Result<(bool, Vec<u8>), MultisigError> {
    ensure_exists(ledger, intent_id)?;
    let intent = ledger.intent(intent_id);
    if intent.executed {
        return Err(MultisigError::AlreadyExecuted { intent_id });
    }
    let required = ledger.required_approvals();
    if intent.approval_count < required {
        return Err(MultisigError::QuorumNotMet {
            intent_id,
            approvals: intent.approval_count,
            required,
        });
    }

    ledger.set_executed(intent_id, true);
    match ledger.invoke(intent.target, intent.value, &intent.payload) {
        Ok(result) => {
            ledger.emit(MultisigEvent::IntentExecuted {
                intent_id,
                result: result.clone(),
            });
            Ok((true, result))
        }
        Err(reason) => {
            ledger.set_executed(intent_id, false);
            ledger.emit(MultisigEvent::IntentExecutionFailed {
                intent_id,
                reason: reason.clone(),
            });
            Ok((false, reason))
        }
    }
}

pub fn intent<L: Ledger>(ledger: &L, intent_id: IntentId) -> Result<Intent, MultisigError> {
    ensure_exists(ledger, intent_id)?;
    Ok(ledger.intent(intent_id))
}

/// True once the intent holds enough approvals for the current quorum.
pub fn is_confirmed<L: Ledger>(ledger: &L, intent_id: IntentId) -> Result<bool, MultisigError> {
    ensure_exists(ledger, intent_id)?;
    Ok(ledger.approval_count(intent_id) >= ledger.required_approvals())
}

pub fn has_approved<L: Ledger>(ledger: &L, intent_id: IntentId, owner: Address) -> bool {
    intent_id != 0 && intent_id <= ledger.intent_count() && ledger.has_approved(intent_id, owner)
}

fn ensure_exists<L: Ledger>(ledger: &L, intent_id: IntentId) -> Result<(), MultisigError> {
    if intent_id == 0 || intent_id > ledger.intent_count() {
        return Err(MultisigError::IntentNotFound { intent_id });
    }
    Ok(())
}
