//! Intent multisig for Arbitrum Stylus.
//!
//! Owners create intents (a target, a value and a payload), approve them, and the contract calls
//! the target once the quorum is reached. Membership and quorum changes are intents that target
//! the contract itself.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]

extern crate alloc;

#[cfg(not(feature = "reentrant"))]
compile_error!(
    "intent-multisig requires the `reentrant` feature: governance intents call back into the contract"
);

pub mod errors;
pub mod events;
pub mod multisig;

pub use errors::MultisigRevert;
pub use multisig::IntentMultisig;
