// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Parsing of recipient addresses, typed one per slot or pasted in bulk.
//!
//! Entries are accepted by shape only: the `0x` prefix and a length of 42 characters.
//! Hex digits and checksums are not verified unless `AddressCheck::Checksummed` is asked for.

use crate::{BatchError, Result};
use classdrop_evm::common::Address as EvmAddress;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Upper bound of recipients in a single batch transfer.
pub const MAX_RECIPIENTS: usize = 11;
pub const ADDRESS_PREFIX: &str = "0x";
/// `0x` followed by 40 characters.
pub const ADDRESS_LEN: usize = 42;
pub const DEFAULT_BULK_DELIMITERS: [char; 3] = ['\n', ',', ';'];

/// How strictly a recipient entry is checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressCheck {
    /// Prefix and length only.
    #[default]
    Shape,
    /// Shape plus 40 hex digits; mixed case entries must carry a valid EIP-55 checksum.
    Checksummed,
}

impl AddressCheck {
    pub fn accepts(&self, entry: &str) -> bool {
        let entry = entry.trim();
        match self {
            AddressCheck::Shape => is_well_formed(entry),
            AddressCheck::Checksummed => is_well_formed(entry) && has_valid_checksum(entry),
        }
    }
}

/// Shape check of a single entry, as typed (the prefix is case sensitive).
pub fn is_well_formed(entry: &str) -> bool {
    let entry = entry.trim();
    entry.starts_with(ADDRESS_PREFIX) && entry.chars().count() == ADDRESS_LEN
}

fn has_valid_checksum(entry: &str) -> bool {
    let digits = &entry[ADDRESS_PREFIX.len()..];
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        // single case addresses carry no checksum
        return true;
    }
    EvmAddress::parse_checksummed(entry, None).is_ok()
}

/// A trimmed recipient entry that passed the shape check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValidatedAddress(String);

impl ValidatedAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into an EVM address. Entries of the right shape that aren't hex fail here.
    pub fn to_evm_address(&self) -> Result<EvmAddress> {
        EvmAddress::from_str(&self.0).map_err(|_| BatchError::MalformedAddress(self.0.clone()))
    }
}

impl Display for ValidatedAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ValidatedAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered recipients, at most `MAX_RECIPIENTS`. Duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressList(Vec<ValidatedAddress>);

impl AddressList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidatedAddress> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidatedAddress] {
        &self.0
    }

    pub fn to_evm_addresses(&self) -> Result<Vec<EvmAddress>> {
        self.0.iter().map(ValidatedAddress::to_evm_address).collect()
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a ValidatedAddress;
    type IntoIter = std::slice::Iter<'a, ValidatedAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Keep the well formed entries of the slots, in order, up to `MAX_RECIPIENTS`.
pub fn parse_individual<I, S>(entries: I) -> AddressList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_individual_with(entries, AddressCheck::Shape)
}

pub fn parse_individual_with<I, S>(entries: I, check: AddressCheck) -> AddressList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let addresses = entries
        .into_iter()
        .filter_map(|entry| {
            let entry = entry.as_ref().trim();
            if entry.is_empty() || !check.accepts(entry) {
                return None;
            }
            Some(ValidatedAddress(entry.to_string()))
        })
        .take(MAX_RECIPIENTS)
        .collect();
    AddressList(addresses)
}

/// Split bulk text on any of the delimiter characters, then keep well formed entries
/// up to `MAX_RECIPIENTS`.
pub fn parse_bulk(text: &str, delimiters: &[char]) -> AddressList {
    parse_bulk_with(text, delimiters, AddressCheck::Shape)
}

pub fn parse_bulk_with(text: &str, delimiters: &[char], check: AddressCheck) -> AddressList {
    parse_individual_with(text.split(delimiters), check)
}

/// The editable slots produced when bulk text is committed. Empty tokens are dropped
/// and the list is cut to `MAX_RECIPIENTS` *before* validation, so malformed entries
/// stay visible for correction. Never returns an empty list.
pub fn split_bulk(text: &str, delimiters: &[char]) -> Vec<String> {
    let slots: Vec<String> = text
        .split(delimiters)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .take(MAX_RECIPIENTS)
        .map(str::to_string)
        .collect();

    if slots.is_empty() {
        vec![String::new()]
    } else {
        slots
    }
}

/// Indices of the non empty slots that fail the check.
pub fn malformed_slots<S: AsRef<str>>(slots: &[S], check: AddressCheck) -> Vec<usize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| {
            let slot = slot.as_ref().trim();
            !slot.is_empty() && !check.accepts(slot)
        })
        .map(|(index, _)| index)
        .collect()
}
