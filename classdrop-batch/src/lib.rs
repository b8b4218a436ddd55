// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Turns recipient input into a bounded, validated batch and summarises the transfer.

#[macro_use]
extern crate tracing;

pub mod address;
pub mod amount;
mod error;
pub mod form;
pub mod submit;
pub mod summary;

pub use address::{
    is_well_formed, malformed_slots, parse_bulk, parse_bulk_with, parse_individual,
    parse_individual_with, split_bulk, AddressCheck, AddressList, ValidatedAddress,
    DEFAULT_BULK_DELIMITERS, MAX_RECIPIENTS,
};
pub use amount::{Amount, TokenAmount};
pub use error::{BatchError, Result};
pub use form::{InputMode, SendForm, SubmissionState};
pub use submit::{submit_form, DecimalsProvider, TransactionSubmitter};
pub use summary::{compute_summary, try_compute_summary, TransferPlan};
