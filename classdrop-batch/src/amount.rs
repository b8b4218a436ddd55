// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{BatchError, Result};

pub use classdrop_evm::common::Amount;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// An amount of tokens in base units, together with the token's decimal precision.
/// `raw / 10^decimals` is the human readable amount.
pub struct TokenAmount {
    raw: Amount,
    decimals: u8,
}

impl TokenAmount {
    pub fn from_base_units(raw: Amount, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    pub fn as_base_units(&self) -> Amount {
        self.raw
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Computes `self * count`, returning `None` if overflow occurred.
    pub fn checked_mul(self, count: usize) -> Option<TokenAmount> {
        self.raw
            .checked_mul(Amount::from(count))
            .map(|raw| Self::from_base_units(raw, self.decimals))
    }

    /// Parse a human entered decimal string into base units, scaling by `10^decimals`.
    ///
    /// More significant fractional digits than `decimals` is an error, the amount is
    /// never rounded or truncated.
    pub fn parse(value_str: &str, decimals: u8) -> Result<Self> {
        let value_str = value_str.trim();
        let mut itr = value_str.splitn(2, '.');
        let units_str = itr.next().unwrap_or_default();
        let remainder_str = itr.next();

        if units_str.is_empty() && remainder_str.map_or(true, str::is_empty) {
            return Err(BatchError::FailedToParseAmount(
                "Can't parse token units".to_string(),
            ));
        }
        if !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(BatchError::FailedToParseAmount(
                "Can't parse token units".to_string(),
            ));
        }

        // only digits at this point, so failing to parse means it doesn't fit
        let units = if units_str.is_empty() {
            Amount::ZERO
        } else {
            units_str
                .parse::<Amount>()
                .map_err(|_| BatchError::ExcessiveValue)?
        };
        // 10^decimals overflows from 78 decimals on, while zero whole units still fit
        let converted_units = if units.is_zero() {
            Amount::ZERO
        } else {
            let scale = pow10(decimals).ok_or(BatchError::ExcessiveValue)?;
            units.checked_mul(scale).ok_or(BatchError::ExcessiveValue)?
        };

        let remainder = {
            let remainder_str = remainder_str.unwrap_or_default();
            if !remainder_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(BatchError::FailedToParseAmount(
                    "Can't parse token remainder".to_string(),
                ));
            }

            let remainder_str = remainder_str.trim_end_matches('0');
            if remainder_str.is_empty() {
                Amount::ZERO
            } else {
                let remainder_conversion = usize::from(decimals)
                    .checked_sub(remainder_str.len())
                    .ok_or(BatchError::LossOfPrecision)?;
                let parsed_remainder = remainder_str
                    .parse::<Amount>()
                    .map_err(|_| BatchError::ExcessiveValue)?;
                let remainder_scale = pow10(remainder_conversion as u8).ok_or(BatchError::ExcessiveValue)?;
                parsed_remainder
                    .checked_mul(remainder_scale)
                    .ok_or(BatchError::ExcessiveValue)?
            }
        };

        let raw = converted_units
            .checked_add(remainder)
            .ok_or(BatchError::ExcessiveValue)?;
        Ok(Self::from_base_units(raw, decimals))
    }
}

/// `10^exp`, or `None` when it doesn't fit in 256 bits.
fn pow10(exp: u8) -> Option<Amount> {
    Amount::from(10).checked_pow(Amount::from(exp))
}

impl Display for TokenAmount {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let (unit, remainder) = match pow10(self.decimals) {
            Some(scale) => (self.raw / scale, self.raw % scale),
            // every representable value is below one whole token
            None => (Amount::ZERO, self.raw),
        };

        if remainder.is_zero() {
            return write!(formatter, "{unit}");
        }

        let digits = remainder.to_string();
        let padding = usize::from(self.decimals).saturating_sub(digits.len());
        let fraction = format!("{}{digits}", "0".repeat(padding));
        write!(formatter, "{unit}.{}", fraction.trim_end_matches('0'))
    }
}
