// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::address::AddressList;
use crate::amount::{Amount, TokenAmount};
use crate::{BatchError, Result};

/// What a batch transfer would do: who receives, how much each, and how much in total.
/// Derived from the current form contents, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferPlan {
    pub recipients: AddressList,
    /// The amount per recipient as it was entered.
    pub amount_per_recipient: String,
    pub decimals: u8,
    pub amount_per_recipient_base_units: Amount,
    pub total_base_units: Amount,
}

impl TransferPlan {
    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }

    pub fn amount_each(&self) -> TokenAmount {
        TokenAmount::from_base_units(self.amount_per_recipient_base_units, self.decimals)
    }

    pub fn total(&self) -> TokenAmount {
        TokenAmount::from_base_units(self.total_base_units, self.decimals)
    }
}

/// Compute the transfer summary, or `None` when there is nothing that could be sent.
pub fn compute_summary(
    recipients: &AddressList,
    amount_per_recipient: &str,
    decimals: Option<u8>,
) -> Option<TransferPlan> {
    try_compute_summary(recipients, amount_per_recipient, decimals)
        .inspect_err(|err| debug!("No transfer summary: {err}"))
        .ok()
}

/// Like `compute_summary`, but says why there is no summary.
///
/// Recipients are checked first, then the decimals, then the amount.
pub fn try_compute_summary(
    recipients: &AddressList,
    amount_per_recipient: &str,
    decimals: Option<u8>,
) -> Result<TransferPlan> {
    if recipients.is_empty() {
        return Err(BatchError::EmptyResult);
    }
    let decimals = decimals.ok_or(BatchError::PrecisionUnavailable)?;

    let amount_each = TokenAmount::parse(amount_per_recipient, decimals)
        .map_err(|err| BatchError::AmountOutOfRange(err.to_string()))?;
    if amount_each.is_zero() {
        return Err(BatchError::AmountOutOfRange(
            "The amount must be greater than zero".to_string(),
        ));
    }

    let total = amount_each
        .checked_mul(recipients.len())
        .ok_or_else(|| BatchError::AmountOutOfRange("The total amount overflows".to_string()))?;

    Ok(TransferPlan {
        recipients: recipients.clone(),
        amount_per_recipient: amount_per_recipient.trim().to_string(),
        decimals,
        amount_per_recipient_base_units: amount_each.as_base_units(),
        total_base_units: total.as_base_units(),
    })
}
