// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::form::SendForm;
use crate::{BatchError, Result};
use async_trait::async_trait;
use classdrop_evm::common::{Address, Amount, TxHash};
use classdrop_evm::contract::token;
use classdrop_evm::wallet::{self, Wallet, DEFAULT_CONFIRMATION_TIMEOUT};

/// Supplies the decimal precision of the token the transfer is denominated in.
#[async_trait]
pub trait DecimalsProvider {
    async fn decimals(&self) -> Result<u8>;
}

/// Sends the batch transfer and reports its outcome.
#[async_trait]
pub trait TransactionSubmitter {
    async fn send_batch(&self, recipients: Vec<Address>, amount_each: Amount) -> Result<TxHash>;
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()>;
}

#[async_trait]
impl DecimalsProvider for Wallet {
    async fn decimals(&self) -> Result<u8> {
        self.token_decimals().await.map_err(|err| {
            error!("Could not fetch token decimals: {err}");
            BatchError::PrecisionUnavailable
        })
    }
}

#[async_trait]
impl TransactionSubmitter for Wallet {
    async fn send_batch(&self, recipients: Vec<Address>, amount_each: Amount) -> Result<TxHash> {
        self.send_to_classmates(recipients, amount_each)
            .await
            .map_err(|err| BatchError::Submission(err.to_string()))
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()> {
        Wallet::wait_for_confirmation(self, tx_hash, DEFAULT_CONFIRMATION_TIMEOUT)
            .await
            .map_err(|err| match err {
                wallet::Error::TokenError(token::Error::ConfirmationTimeout(tx_hash)) => {
                    BatchError::Unconfirmed(tx_hash)
                }
                err => BatchError::Submission(err.to_string()),
            })
    }
}

/// Submit the form's batch transfer and follow it until it is confirmed or fails.
///
/// Nothing is sent when there is no summary, or while an earlier transaction is unconfirmed.
/// Failures are recorded on the form and returned, they are never retried.
pub async fn submit_form<D, S>(form: &mut SendForm, decimals: &D, submitter: &S) -> Result<TxHash>
where
    D: DecimalsProvider + Sync,
    S: TransactionSubmitter + Sync,
{
    if form.submission().is_in_flight() {
        return Err(BatchError::SubmissionInProgress);
    }
    if let Some(tx_hash) = form.submission().unconfirmed_tx() {
        warn!("Refusing to submit while {tx_hash:?} is unconfirmed");
        return Err(BatchError::Unconfirmed(tx_hash));
    }

    let decimals = decimals.decimals().await.ok();
    let plan = form.try_summary(decimals)?;
    let recipients = plan.recipients.to_evm_addresses()?;
    info!(
        "Submitting batch transfer of {} to each of {} recipients",
        plan.amount_each(),
        recipients.len()
    );

    form.begin_submission();
    let tx_hash = match submitter
        .send_batch(recipients, plan.amount_per_recipient_base_units)
        .await
    {
        Ok(tx_hash) => tx_hash,
        Err(err) => {
            error!("Batch transfer could not be submitted: {err}");
            form.submission_failed(err.user_message());
            return Err(err);
        }
    };

    form.submission_sent(tx_hash);
    match submitter.wait_for_confirmation(tx_hash).await {
        Ok(()) => {}
        Err(BatchError::Unconfirmed(unconfirmed)) => {
            warn!("Batch transfer {unconfirmed:?} is not confirmed yet");
            form.submission_unconfirmed(unconfirmed);
            return Err(BatchError::Unconfirmed(unconfirmed));
        }
        Err(err) => {
            error!("Batch transfer {tx_hash:?} failed to confirm: {err}");
            form.submission_failed(err.user_message());
            return Err(err);
        }
    }

    form.submission_confirmed(tx_hash);
    info!("Batch transfer {tx_hash:?} confirmed");
    Ok(tx_hash)
}
