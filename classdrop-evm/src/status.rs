// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::utils::http_provider;
use crate::{chain_name, Network};
use alloy::providers::Provider;
use alloy::transports::{RpcError, TransportErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
}

/// Whether the RPC endpoint is on the chain we intend to send on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkStatus {
    pub expected_chain_id: Option<u64>,
    pub current_chain_id: u64,
}

impl NetworkStatus {
    /// Without an expected chain id any chain is accepted.
    pub fn is_correct_network(&self) -> bool {
        self.expected_chain_id
            .map_or(true, |expected| expected == self.current_chain_id)
    }

    pub fn current_network_name(&self) -> String {
        chain_name(self.current_chain_id)
    }

    pub fn expected_network_name(&self) -> Option<String> {
        self.expected_chain_id.map(chain_name)
    }
}

/// Ask the network's RPC endpoint which chain it is on.
pub async fn network_status(network: &Network) -> Result<NetworkStatus, Error> {
    let provider = http_provider(network.rpc_url().clone());
    let current_chain_id = provider
        .get_chain_id()
        .await
        .inspect_err(|err| error!("Error getting chain id from {}: {err:?}", network.rpc_url()))?;

    let status = NetworkStatus {
        expected_chain_id: network.chain_id(),
        current_chain_id,
    };
    if status.is_correct_network() {
        debug!("Connected to {}", status.current_network_name());
    } else {
        warn!(
            "Connected to {} but expected chain id {:?}",
            status.current_network_name(),
            status.expected_chain_id
        );
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BASE_SEPOLIA_CHAIN_ID, SEPOLIA_CHAIN_ID};

    #[test]
    fn mismatched_chain_is_flagged() {
        let status = NetworkStatus {
            expected_chain_id: Some(BASE_SEPOLIA_CHAIN_ID),
            current_chain_id: SEPOLIA_CHAIN_ID,
        };
        assert!(!status.is_correct_network());
        assert_eq!(status.current_network_name(), "Sepolia");
        assert_eq!(status.expected_network_name().as_deref(), Some("Base Sepolia"));
    }

    #[test]
    fn unknown_expectation_accepts_any_chain() {
        let status = NetworkStatus {
            expected_chain_id: None,
            current_chain_id: 999,
        };
        assert!(status.is_correct_network());
        assert_eq!(status.current_network_name(), "Unknown (999)");
    }
}
