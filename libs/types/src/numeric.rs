//! Raw token amounts
//!
//! The contract core works exclusively in raw integer units of the deposit
//! token. Decimal conversion exists only for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Raw integer token units (the on-chain `uint256` value domain).
pub type Amount = u128;

/// Decimal precision of the USDC-style deposit token.
pub const USDC_DECIMALS: u8 = 6;

/// Largest scale `Decimal` can represent.
const MAX_SCALE: u8 = 28;

/// Convert raw units into a decimal value, e.g. `10_000_000` at 6 decimals is `10`.
///
/// Returns `None` when the value does not fit in `Decimal`'s 96-bit mantissa
/// or the precision is beyond its maximum scale.
pub fn format_units(raw: Amount, decimals: u8) -> Option<Decimal> {
    if decimals > MAX_SCALE {
        return None;
    }
    let signed = i128::try_from(raw).ok()?;
    Decimal::try_from_i128_with_scale(signed, u32::from(decimals)).ok()
}

/// Render raw units with a fixed number of decimal places, rounding half away from zero.
pub fn format_fixed(raw: Amount, decimals: u8, dp: u32) -> Option<String> {
    let mut value =
        format_units(raw, decimals)?.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(dp);
    Some(value.to_string())
}

/// Serde adapter encoding amounts as decimal strings.
///
/// JSON consumers lose precision on integers above 2^53, so amounts cross the
/// wire as strings, the way log indexers render `uint256` values.
pub mod serde_amount {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Amount;

    pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units_usdc() {
        assert_eq!(format_units(10_000_000, USDC_DECIMALS), Some(Decimal::from(10)));
        assert_eq!(
            format_units(50_000, USDC_DECIMALS),
            Some(Decimal::new(5, 2))
        );
    }

    #[test]
    fn test_format_units_zero_decimals() {
        assert_eq!(format_units(42, 0), Some(Decimal::from(42)));
    }

    #[test]
    fn test_format_units_out_of_range() {
        assert_eq!(format_units(Amount::MAX, USDC_DECIMALS), None);
        assert_eq!(format_units(1, 29), None);
    }

    #[test]
    fn test_format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(50_000, USDC_DECIMALS, 4).as_deref(), Some("0.0500"));
        assert_eq!(format_fixed(0, USDC_DECIMALS, 4).as_deref(), Some("0.0000"));
        assert_eq!(format_fixed(123_456_789, USDC_DECIMALS, 4).as_deref(), Some("123.4568"));
    }

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Wrapped {
        #[serde(with = "serde_amount")]
        value: Amount,
    }

    #[test]
    fn test_serde_amount_uses_strings() {
        let wrapped = Wrapped { value: Amount::MAX };
        let json = serde_json::to_string(&wrapped).unwrap();
        assert_eq!(json, format!("{{\"value\":\"{}\"}}", Amount::MAX));

        let back: Wrapped = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wrapped);
        assert!(serde_json::from_str::<Wrapped>("{\"value\":\"-1\"}").is_err());
    }
}
