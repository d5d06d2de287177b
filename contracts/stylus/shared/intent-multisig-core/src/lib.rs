//! Owner registry and intent lifecycle for the Stylus intent multisig.
//!
//! The state machine is written against the [`Ledger`] trait so that the same code runs inside the
//! Stylus contract (storage + host calls) and inside off-chain tooling (in-memory simulation).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod abi;
pub mod engine;
pub mod errors;
pub mod events;
pub mod intent;
pub mod ledger;
pub mod registry;

pub use errors::{FromAbiError, MultisigError};
pub use events::MultisigEvent;
pub use intent::{narrow, Intent, IntentId};
pub use ledger::Ledger;
