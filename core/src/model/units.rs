// bazaar/src/model/units.rs

//! Conversions between the token's smallest unit and display amounts.

use alloy_primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::U256;

/// Decimal places of the payment token (cUSD and every standard ERC20 here).
pub const TOKEN_DECIMALS: u8 = 18;

/// Formats `amount` (smallest units) shifted by `decimals`, rounded half-up
/// to two decimal places: `1_500_000_000_000_000_000` → `"1.50"`.
pub fn format_amount(amount: U256, decimals: u8) -> String {
  let cents = if decimals >= 2 {
    let divisor = U256::from(10u64).pow(U256::from(decimals - 2));
    let (quotient, remainder) = amount.div_rem(divisor);
    // round half up on the first dropped digit group
    if remainder >= divisor - remainder {
      quotient + U256::from(1u64)
    } else {
      quotient
    }
  } else {
    amount * U256::from(10u64).pow(U256::from(2 - decimals))
  };

  let (whole, frac) = cents.div_rem(U256::from(100u64));
  format!("{}.{:02}", whole, frac.to::<u64>())
}

/// Parses a display amount such as `"1.5"` into smallest units.
///
/// Negative amounts and amounts with more fractional digits than `decimals`
/// are rejected.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err("amount is empty".to_string());
  }
  match parse_units(trimmed, decimals) {
    Ok(ParseUnits::U256(value)) => Ok(value),
    Ok(ParseUnits::I256(_)) => Err(format!("amount '{trimmed}' is negative")),
    Err(e) => Err(format!("invalid amount '{trimmed}': {e}")),
  }
}
