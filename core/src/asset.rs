//! Symbols and fixed-point assets
//!
//! Amounts are raw integers scaled by the symbol's precision, so
//! `Asset { amount: 12345, symbol: 4,EOS }` is `1.2345 EOS`.

use crate::constants::{MAX_ASSET_AMOUNT, MAX_PRECISION, MAX_SYMBOL_CODE_LEN};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ticker code: 1 to 7 uppercase ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolCode(String);

impl SymbolCode {
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        if code.is_empty()
            || code.len() > MAX_SYMBOL_CODE_LEN
            || !code.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(CoreError::InvalidSymbol(code));
        }
        Ok(SymbolCode(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SymbolCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SymbolCode::new(value)
    }
}

impl From<SymbolCode> for String {
    fn from(code: SymbolCode) -> Self {
        code.0
    }
}

/// Ticker code plus fixed decimal precision, written `4,CREATOR`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    precision: u8,
    code: SymbolCode,
}

impl Symbol {
    pub fn new(precision: u8, code: &str) -> Result<Self, CoreError> {
        if precision > MAX_PRECISION {
            return Err(CoreError::InvalidSymbol(format!("{},{}", precision, code)));
        }
        Ok(Symbol {
            precision,
            code: SymbolCode::new(code)?,
        })
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn code(&self) -> &SymbolCode {
        &self.code
    }

    /// `10^precision`; always fits since precision is at most 18
    pub fn precision_factor(&self) -> i64 {
        10i64.pow(u32::from(self.precision))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| CoreError::InvalidSymbol(s.to_string()))?;
        let precision = precision
            .trim()
            .parse::<u8>()
            .map_err(|_| CoreError::InvalidSymbol(s.to_string()))?;
        Symbol::new(precision, code.trim())
    }
}

impl TryFrom<String> for Symbol {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.to_string()
    }
}

/// Signed fixed-point amount of a symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    pub amount: i64,
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Asset { amount, symbol }
    }

    pub fn zero(symbol: Symbol) -> Self {
        Asset { amount: 0, symbol }
    }

    /// Amount within `-(2^62 - 1) ..= 2^62 - 1`
    pub fn is_valid(&self) -> bool {
        (-MAX_ASSET_AMOUNT..=MAX_ASSET_AMOUNT).contains(&self.amount)
    }

    pub fn checked_add(&self, other: &Asset) -> Result<Asset, CoreError> {
        self.ensure_same_symbol(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(CoreError::AmountOverflow)?;
        Self::bounded(amount, self.symbol.clone())
    }

    pub fn checked_sub(&self, other: &Asset) -> Result<Asset, CoreError> {
        self.ensure_same_symbol(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(CoreError::AmountOverflow)?;
        Self::bounded(amount, self.symbol.clone())
    }

    fn ensure_same_symbol(&self, other: &Asset) -> Result<(), CoreError> {
        if self.symbol != other.symbol {
            return Err(CoreError::SymbolMismatch {
                expected: self.symbol.clone(),
                found: other.symbol.clone(),
            });
        }
        Ok(())
    }

    fn bounded(amount: i64, symbol: Symbol) -> Result<Asset, CoreError> {
        let asset = Asset { amount, symbol };
        if asset.is_valid() {
            Ok(asset)
        } else {
            Err(CoreError::AmountOverflow)
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = i128::from(self.amount).abs();
        let precision = usize::from(self.symbol.precision());

        if precision == 0 {
            return write!(f, "{}{} {}", sign, abs, self.symbol.code());
        }

        let factor = i128::from(self.symbol.precision_factor());
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            abs / factor,
            abs % factor,
            self.symbol.code(),
            width = precision
        )
    }
}

impl FromStr for Asset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidAsset(s.to_string());

        let (number, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }
        if digits.contains('.') && frac_part.is_empty() {
            return Err(invalid());
        }

        let precision = u8::try_from(frac_part.len()).map_err(|_| invalid())?;
        let symbol = Symbol::new(precision, code.trim())?;

        let int_value: i128 = int_part.parse().map_err(|_| invalid())?;
        let frac_value: i128 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| invalid())?
        };
        let magnitude = int_value
            .checked_mul(i128::from(symbol.precision_factor()))
            .and_then(|v| v.checked_add(frac_value))
            .filter(|v| *v <= i128::from(MAX_ASSET_AMOUNT))
            .ok_or_else(invalid)?;

        let amount = i64::try_from(magnitude).map_err(|_| invalid())?;
        Ok(Asset {
            amount: if negative { -amount } else { amount },
            symbol,
        })
    }
}

impl TryFrom<String> for Asset {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eos() -> Symbol {
        Symbol::new(4, "EOS").unwrap()
    }

    #[test]
    fn test_symbol_parse_and_display() {
        let symbol: Symbol = "4,CREATOR".parse().unwrap();
        assert_eq!(symbol.precision(), 4);
        assert_eq!(symbol.code().as_str(), "CREATOR");
        assert_eq!(symbol.to_string(), "4,CREATOR");
        assert_eq!(symbol.precision_factor(), 10_000);
    }

    #[test]
    fn test_invalid_symbols() {
        assert!(Symbol::new(4, "eos").is_err());
        assert!(Symbol::new(4, "TOOLONGX").is_err());
        assert!(Symbol::new(19, "EOS").is_err());
        assert!("EOS".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_asset_display() {
        assert_eq!(Asset::new(12345, eos()).to_string(), "1.2345 EOS");
        assert_eq!(Asset::new(-5, eos()).to_string(), "-0.0005 EOS");
        assert_eq!(
            Asset::new(7, Symbol::new(0, "PTS").unwrap()).to_string(),
            "7 PTS"
        );
    }

    #[test]
    fn test_asset_parse() {
        let asset: Asset = "100.0000 EOS".parse().unwrap();
        assert_eq!(asset.amount, 1_000_000);
        assert_eq!(asset.symbol, eos());

        let negative: Asset = "-0.5000 EOS".parse().unwrap();
        assert_eq!(negative.amount, -5_000);

        assert!("1.0000".parse::<Asset>().is_err());
        assert!("1. EOS".parse::<Asset>().is_err());
        assert!("abc EOS".parse::<Asset>().is_err());
        assert!("99999999999999999999.0000 EOS".parse::<Asset>().is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Asset::new(10_000, eos());
        let b = Asset::new(2_500, eos());
        assert_eq!(a.checked_add(&b).unwrap().amount, 12_500);
        assert_eq!(a.checked_sub(&b).unwrap().amount, 7_500);

        let max = Asset::new(MAX_ASSET_AMOUNT, eos());
        assert_eq!(max.checked_add(&b), Err(CoreError::AmountOverflow));

        let other = Asset::new(1, Symbol::new(4, "CREATOR").unwrap());
        assert!(matches!(
            a.checked_add(&other),
            Err(CoreError::SymbolMismatch { .. })
        ));
    }

    #[test]
    fn test_asset_validity() {
        assert!(Asset::new(MAX_ASSET_AMOUNT, eos()).is_valid());
        assert!(!Asset::new(MAX_ASSET_AMOUNT + 1, eos()).is_valid());
        assert!(!Asset::new(i64::MIN, eos()).is_valid());
    }

    #[test]
    fn test_asset_serde_as_string() {
        let asset = Asset::new(15_000, eos());
        let json = serde_json::to_string(&asset).unwrap();
        assert_eq!(json, "\"1.5000 EOS\"");
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, asset);
    }
}
