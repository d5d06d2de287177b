//! Solidity ABI surface of the multisig.
//!
//! Shared by the contract (custom errors), the encoder (calldata) and the in-memory ledger
//! (self-call dispatch and revert data).

use alloy_sol_types::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    error Unauthorized(address caller);
    #[derive(Debug, PartialEq, Eq)]
    error OnlySelf(address caller);
    #[derive(Debug, PartialEq, Eq)]
    error IntentNotFound(uint256 intentId);
    #[derive(Debug, PartialEq, Eq)]
    error AlreadyExecuted(uint256 intentId);
    #[derive(Debug, PartialEq, Eq)]
    error DuplicateApproval(uint256 intentId, address owner);
    #[derive(Debug, PartialEq, Eq)]
    error QuorumNotMet(uint256 intentId, uint256 approvals, uint256 required);
    #[derive(Debug, PartialEq, Eq)]
    error InvalidQuorum(uint256 required, uint256 ownerCount);
    #[derive(Debug, PartialEq, Eq)]
    error QuorumExceedsMembers(uint256 required, uint256 ownerCount);
    #[derive(Debug, PartialEq, Eq)]
    error AlreadyMember(address owner);
    #[derive(Debug, PartialEq, Eq)]
    error NotMember(address owner);
    #[derive(Debug, PartialEq, Eq)]
    error InvalidOwner(address owner);

    interface IIntentMultisig {
        function createIntent(address target, uint256 value, bytes payload) external returns (uint256);
        function approveIntent(uint256 intentId) external;
        function executeIntent(uint256 intentId) external returns (bool, bytes);

        function setRequiredApprovals(uint256 required) external;
        function addOwner(address owner) external;
        function removeOwner(address owner) external;

        function isOwner(address identity) external view returns (bool);
        function ownerCount() external view returns (uint256);
        function requiredApprovals() external view returns (uint256);
        function intentCount() external view returns (uint256);
        function getIntent(uint256 intentId) external view returns (address, uint256, bytes, uint256, bool);
        function hasApproved(uint256 intentId, address owner) external view returns (bool);
        function isConfirmed(uint256 intentId) external view returns (bool);
    }
}
