//! Basis-point fee rates

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::FeeRateError;
use crate::numeric::Amount;

/// One hundred percent, in basis points.
pub const BPS_DENOMINATOR: u16 = 10_000;

/// A fee expressed in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FeeRate(u16);

impl FeeRate {
    /// Withdrawal fee charged by the vault: 50 bps (0.5%).
    pub const DEFAULT_WITHDRAW_FEE: FeeRate = FeeRate(50);

    pub const ZERO: FeeRate = FeeRate(0);

    /// Build a rate, rejecting anything above 100%.
    pub fn from_bps(bps: u16) -> Result<Self, FeeRateError> {
        if bps > BPS_DENOMINATOR {
            return Err(FeeRateError::AboveDenominator { bps });
        }
        Ok(Self(bps))
    }

    pub fn bps(&self) -> u16 {
        self.0
    }

    /// `floor(gross * bps / 10_000)`.
    ///
    /// Split as `q * bps + floor(r * bps / 10_000)` with `gross = q * 10_000 + r`,
    /// which is exact and cannot overflow for any `gross`.
    pub fn fee_on(&self, gross: Amount) -> Amount {
        let denom = Amount::from(BPS_DENOMINATOR);
        let bps = Amount::from(self.0);
        (gross / denom) * bps + (gross % denom) * bps / denom
    }

    /// Split a gross amount into `(net, fee)`; `net + fee == gross` always.
    pub fn split(&self, gross: Amount) -> (Amount, Amount) {
        let fee = self.fee_on(gross);
        (gross - fee, fee)
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::DEFAULT_WITHDRAW_FEE
    }
}

impl TryFrom<u16> for FeeRate {
    type Error = FeeRateError;

    fn try_from(bps: u16) -> Result<Self, Self::Error> {
        Self::from_bps(bps)
    }
}

impl From<FeeRate> for u16 {
    fn from(rate: FeeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_fee_is_half_percent() {
        let rate = FeeRate::default();
        assert_eq!(rate.bps(), 50);
        assert_eq!(rate.to_string(), "0.50%");
    }

    #[test]
    fn test_fee_on_ten_usdc() {
        // 10 USDC at 6 decimals
        assert_eq!(FeeRate::DEFAULT_WITHDRAW_FEE.fee_on(10_000_000), 50_000);
        assert_eq!(
            FeeRate::DEFAULT_WITHDRAW_FEE.split(10_000_000),
            (9_950_000, 50_000)
        );
    }

    #[test]
    fn test_small_amounts_round_fee_to_zero() {
        let rate = FeeRate::DEFAULT_WITHDRAW_FEE;
        assert_eq!(rate.fee_on(199), 0);
        assert_eq!(rate.fee_on(200), 1);
    }

    #[test]
    fn test_fee_on_max_amount_does_not_overflow() {
        let rate = FeeRate::from_bps(BPS_DENOMINATOR).unwrap();
        assert_eq!(rate.fee_on(Amount::MAX), Amount::MAX);
    }

    #[test]
    fn test_rate_above_denominator_rejected() {
        assert_eq!(
            FeeRate::from_bps(10_001),
            Err(FeeRateError::AboveDenominator { bps: 10_001 })
        );
    }

    #[test]
    fn test_fee_rate_serde_validates() {
        let rate: FeeRate = serde_json::from_str("50").unwrap();
        assert_eq!(rate, FeeRate::DEFAULT_WITHDRAW_FEE);
        assert!(serde_json::from_str::<FeeRate>("20000").is_err());
    }

    proptest! {
        #[test]
        fn fee_matches_naive_formula(gross in 0u128..=(u64::MAX as u128), bps in 0u16..=BPS_DENOMINATOR) {
            let rate = FeeRate::from_bps(bps).unwrap();
            prop_assert_eq!(rate.fee_on(gross), gross * u128::from(bps) / 10_000);
        }

        #[test]
        fn split_conserves_value(gross in any::<u128>(), bps in 0u16..=BPS_DENOMINATOR) {
            let rate = FeeRate::from_bps(bps).unwrap();
            let (net, fee) = rate.split(gross);
            prop_assert_eq!(net + fee, gross);
        }
    }
}
