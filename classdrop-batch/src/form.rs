// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::address::{
    malformed_slots, parse_individual_with, split_bulk, AddressCheck, AddressList,
    DEFAULT_BULK_DELIMITERS, MAX_RECIPIENTS,
};
use crate::summary::{compute_summary, try_compute_summary, TransferPlan};
use crate::Result;
use classdrop_evm::common::TxHash;

/// Which of the two address inputs is in use. Data is never synced between them,
/// bulk text only replaces the slots when it is committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Individual,
    Bulk,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Waiting for the submitter to accept the transaction.
    Pending,
    Confirming(TxHash),
    Confirmed(TxHash),
    Failed(String),
    /// Sent, but the wait for its receipt ran out. It may still be mined.
    Unconfirmed(TxHash),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Pending | SubmissionState::Confirming(_))
    }

    /// A transaction that may still land, sending again could pay twice.
    pub fn unconfirmed_tx(&self) -> Option<TxHash> {
        match self {
            SubmissionState::Unconfirmed(tx_hash) => Some(*tx_hash),
            _ => None,
        }
    }
}

/// The state behind the send tokens form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendForm {
    slots: Vec<String>,
    amount: String,
    bulk_text: String,
    mode: InputMode,
    check: AddressCheck,
    submission: SubmissionState,
}

impl Default for SendForm {
    fn default() -> Self {
        Self::new(AddressCheck::default())
    }
}

impl SendForm {
    pub fn new(check: AddressCheck) -> Self {
        Self {
            slots: vec![String::new()],
            amount: String::new(),
            bulk_text: String::new(),
            mode: InputMode::Individual,
            check,
            submission: SubmissionState::Idle,
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn bulk_text(&self) -> &str {
        &self.bulk_text
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// Adds an empty slot. Refused once there are `MAX_RECIPIENTS` slots.
    pub fn add_slot(&mut self) -> bool {
        if self.slots.len() >= MAX_RECIPIENTS {
            return false;
        }
        self.slots.push(String::new());
        true
    }

    /// Removes a slot. The last remaining slot can't be removed.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if self.slots.len() <= 1 || index >= self.slots.len() {
            return false;
        }
        self.slots.remove(index);
        true
    }

    pub fn update_slot(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn set_bulk_text(&mut self, text: impl Into<String>) {
        self.bulk_text = text.into();
    }

    pub fn toggle_mode(&mut self) -> InputMode {
        self.mode = match self.mode {
            InputMode::Individual => InputMode::Bulk,
            InputMode::Bulk => InputMode::Individual,
        };
        self.mode
    }

    /// Replace the slots with the bulk text, clear it and go back to individual input.
    pub fn commit_bulk(&mut self) {
        self.slots = split_bulk(&self.bulk_text, &DEFAULT_BULK_DELIMITERS);
        debug!("Committed bulk text into {} address slots", self.slots.len());
        self.bulk_text.clear();
        self.mode = InputMode::Individual;
    }

    pub fn recipients(&self) -> AddressList {
        parse_individual_with(&self.slots, self.check)
    }

    /// Slots to flag as invalid.
    pub fn malformed_slots(&self) -> Vec<usize> {
        malformed_slots(&self.slots, self.check)
    }

    pub fn summary(&self, decimals: Option<u8>) -> Option<TransferPlan> {
        compute_summary(&self.recipients(), &self.amount, decimals)
    }

    pub fn try_summary(&self, decimals: Option<u8>) -> Result<TransferPlan> {
        try_compute_summary(&self.recipients(), &self.amount, decimals)
    }

    pub fn is_submittable(&self, decimals: Option<u8>) -> bool {
        !self.submission.is_in_flight()
            && self.submission.unconfirmed_tx().is_none()
            && self.summary(decimals).is_some()
    }

    pub fn begin_submission(&mut self) {
        self.submission = SubmissionState::Pending;
    }

    pub fn submission_sent(&mut self, tx_hash: TxHash) {
        self.submission = SubmissionState::Confirming(tx_hash);
    }

    /// The batch went through, start over with an empty form.
    pub fn submission_confirmed(&mut self, tx_hash: TxHash) {
        self.slots = vec![String::new()];
        self.amount.clear();
        self.submission = SubmissionState::Confirmed(tx_hash);
    }

    /// Keeps the inputs so the user can retry.
    pub fn submission_failed(&mut self, message: impl Into<String>) {
        self.submission = SubmissionState::Failed(message.into());
    }

    /// Keeps the inputs, nothing can be submitted until the user has checked the transaction.
    pub fn submission_unconfirmed(&mut self, tx_hash: TxHash) {
        self.submission = SubmissionState::Unconfirmed(tx_hash);
    }

    /// The user checked the unconfirmed transaction, allow submitting again.
    pub fn dismiss_unconfirmed(&mut self) {
        if self.submission.unconfirmed_tx().is_some() {
            self.submission = SubmissionState::Idle;
        }
    }
}
