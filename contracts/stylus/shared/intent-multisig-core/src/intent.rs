use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

/// Intent ids start at 1; 0 is never allocated.
pub type IntentId = u64;

/// A proposed call (or plain value transfer when `payload` is empty).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub target: Address,
    pub value: U256,
    pub payload: Vec<u8>,
    /// Number of distinct owners that approved; the creator counts as the first.
    pub approval_count: u64,
    pub executed: bool,
}

/// ABI ids and counts are `uint256`; anything past `u64` saturates, which no id or quorum reaches.
pub fn narrow(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_saturates_wide_words() {
        assert_eq!(narrow(U256::from(7)), 7);
        assert_eq!(narrow(U256::from(u64::MAX)), u64::MAX);
        assert_eq!(narrow(U256::from(u64::MAX) + U256::from(1)), u64::MAX);
        assert_eq!(narrow(U256::MAX), u64::MAX);
    }
}
