// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use classdrop_evm::common::TxHash;
use thiserror::Error;

/// Specialisation of `std::Result`.
pub type Result<T, E = BatchError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
/// Batch errors
pub enum BatchError {
    #[error("Lost precision on the number of tokens during parsing.")]
    LossOfPrecision,
    #[error("The token amount would exceed the maximum value")]
    ExcessiveValue,
    #[error("Failed to parse: {0}")]
    FailedToParseAmount(String),
    #[error("Malformed address: {0}")]
    MalformedAddress(String),
    #[error("There are no valid recipient addresses")]
    EmptyResult,
    #[error("The token decimals are not available yet")]
    PrecisionUnavailable,
    #[error("The amount is out of range: {0}")]
    AmountOutOfRange(String),
    #[error("A transaction is already being submitted")]
    SubmissionInProgress,
    #[error("Transaction failed: {0}")]
    Submission(String),
    #[error("Transaction {0} was sent but is not confirmed yet, check it before sending again")]
    Unconfirmed(TxHash),
}

impl BatchError {
    /// The message shown to the user for a failed submission. Messages coming from the
    /// transaction submitter are passed through untouched.
    pub fn user_message(&self) -> String {
        match self {
            BatchError::Submission(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
