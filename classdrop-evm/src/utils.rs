// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, EthereumWallet};
use crate::{CustomNetwork, Deployment, Network};
use alloy::network::Ethereum;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::http::{reqwest, Client, Http};
use std::env;
use std::str::FromStr;

/// environment variable to select one of the named networks
pub const EVM_NETWORK: &str = "EVM_NETWORK";
/// environment variable to connect to a custom EVM network
pub const RPC_URL: &str = "RPC_URL";
const RPC_URL_BUILD_TIME_VAL: Option<&str> = option_env!("RPC_URL");
/// optional chain id of the custom EVM network
pub const CHAIN_ID: &str = "CHAIN_ID";
pub const TOKEN_CONTRACT_ADDRESS: &str = "TOKEN_CONTRACT_ADDRESS";
const TOKEN_CONTRACT_ADDRESS_BUILD_TIME_VAL: Option<&str> = option_env!("TOKEN_CONTRACT_ADDRESS");

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to get EVM network: {0}")]
    FailedToGetEvmNetwork(String),
    #[error("Invalid token contract address: {0}")]
    InvalidTokenAddress(String),
    #[error("No token contract is known for network {0}, set {TOKEN_CONTRACT_ADDRESS}")]
    MissingTokenAddress(String),
}

/// Get the `Network` from environment variables.
///
/// `EVM_NETWORK` selects a named network, otherwise `RPC_URL` (with an optional `CHAIN_ID`)
/// selects a custom one. Falls back to Base Sepolia.
pub fn get_evm_network_from_env() -> Result<Network, Error> {
    let evm_network = env::var(EVM_NETWORK).ok();
    let rpc_url = env::var(RPC_URL)
        .ok()
        .or_else(|| RPC_URL_BUILD_TIME_VAL.map(|s| s.to_string()));
    let chain_id = env::var(CHAIN_ID).ok();

    network_from_vars(evm_network.as_deref(), rpc_url.as_deref(), chain_id.as_deref())
}

fn network_from_vars(
    evm_network: Option<&str>,
    rpc_url: Option<&str>,
    chain_id: Option<&str>,
) -> Result<Network, Error> {
    if let Some(name) = evm_network {
        info!("Using EVM network '{name}' as {EVM_NETWORK} is set");
        return Network::from_str(name);
    }

    if let Some(rpc_url) = rpc_url {
        let chain_id = chain_id
            .map(|id| {
                id.trim().parse::<u64>().map_err(|_| {
                    Error::FailedToGetEvmNetwork(format!("{CHAIN_ID} must be a number, got '{id}'"))
                })
            })
            .transpose()?;
        info!("Using custom EVM network from environment variables");
        return Ok(Network::Custom(CustomNetwork::new(rpc_url, chain_id)?));
    }

    if cfg!(feature = "local") {
        info!("Using local Hardhat network as 'local' feature flag is enabled");
        return Ok(Network::Hardhat);
    }

    debug!("No EVM network configured, using Base Sepolia");
    Ok(Network::BaseSepolia)
}

/// Get the token `Deployment` for a network, honouring `TOKEN_CONTRACT_ADDRESS`.
pub fn get_deployment_from_env(network: Network) -> Result<Deployment, Error> {
    let token_address = env::var(TOKEN_CONTRACT_ADDRESS)
        .ok()
        .or_else(|| TOKEN_CONTRACT_ADDRESS_BUILD_TIME_VAL.map(|s| s.to_string()));
    deployment_from_vars(network, token_address.as_deref())
}

fn deployment_from_vars(network: Network, token_address: Option<&str>) -> Result<Deployment, Error> {
    match token_address {
        Some(address) => Ok(Deployment::new(network, parse_token_address(address)?)),
        None => {
            let identifier = network.identifier().to_string();
            Deployment::for_network(network).ok_or_else(|| {
                error!("No token contract address for network {identifier}");
                Error::MissingTokenAddress(identifier)
            })
        }
    }
}

pub fn parse_token_address(address: &str) -> Result<Address, Error> {
    Address::from_str(address.trim())
        .map_err(|err| Error::InvalidTokenAddress(format!("{address}: {err}")))
}

pub(crate) fn http_provider(rpc_url: reqwest::Url) -> impl Provider<Http<Client>, Ethereum> {
    ProviderBuilder::new()
        .with_recommended_fillers()
        .on_http(rpc_url)
}

pub(crate) fn http_provider_with_wallet(
    rpc_url: reqwest::Url,
    wallet: EthereumWallet,
) -> impl Provider<Http<Client>, Ethereum> {
    ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(rpc_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_network_takes_precedence_over_rpc_url() -> Result<(), Error> {
        let network = network_from_vars(Some("sepolia"), Some("http://localhost:8545"), None)?;
        assert_eq!(network, Network::Sepolia);
        Ok(())
    }

    #[test]
    fn rpc_url_selects_custom_network() -> Result<(), Error> {
        let network = network_from_vars(None, Some("http://localhost:8545"), Some("1337"))?;
        match network {
            Network::Custom(custom) => {
                assert_eq!(custom.chain_id, Some(1337));
                assert_eq!(custom.rpc_url_http.as_str(), "http://localhost:8545/");
            }
            other => panic!("expected a custom network, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn bad_chain_id_is_an_error() {
        assert!(network_from_vars(None, Some("http://localhost:8545"), Some("abc")).is_err());
        assert!(network_from_vars(Some("moonbase"), None, None).is_err());
    }

    #[test]
    fn token_address_falls_back_to_network_default() -> Result<(), Error> {
        let deployment = deployment_from_vars(Network::BaseSepolia, None)?;
        assert_eq!(deployment, Deployment::default());

        let custom = deployment_from_vars(
            Network::Sepolia,
            Some(" 0x0000000000000000000000000000000000000001 "),
        )?;
        assert_eq!(custom.token_address, Address::with_last_byte(1));

        assert!(matches!(
            deployment_from_vars(Network::BaseMainnet, None),
            Err(Error::MissingTokenAddress(_))
        ));
        assert!(matches!(
            deployment_from_vars(Network::BaseSepolia, Some("0x1234")),
            Err(Error::InvalidTokenAddress(_))
        ));
        Ok(())
    }
}
