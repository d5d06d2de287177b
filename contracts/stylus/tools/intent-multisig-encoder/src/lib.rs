//! Off-chain tooling for the intent multisig: calldata builders for intents and governance
//! actions, revert decoding, and [`ledger::MemoryLedger`] for simulating the contract.

pub mod encoder;
pub mod ledger;
pub mod types;
