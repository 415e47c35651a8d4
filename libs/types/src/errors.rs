//! Error types for value parsing and validation

use thiserror::Error;

/// Address parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid address length: expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid hex in address: {input}")]
    InvalidHex { input: String },
}

/// Fee rate validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeRateError {
    #[error("Fee rate {bps} bps exceeds 10000 bps")]
    AboveDenominator { bps: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_error_display() {
        let err = AddressError::InvalidLength {
            expected: 40,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid address length: expected 40 hex digits, got 3"
        );
    }

    #[test]
    fn test_fee_rate_error_display() {
        let err = FeeRateError::AboveDenominator { bps: 12_000 };
        assert!(err.to_string().contains("12000"));
    }
}
