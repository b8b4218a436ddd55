// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#[macro_use]
extern crate tracing;

use crate::common::Address;
use alloy::primitives::address;
use alloy::transports::http::reqwest;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

pub mod common;
pub mod contract;
pub mod status;
pub mod token_info;
pub mod utils;
pub mod wallet;

pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;
pub const BASE_MAINNET_CHAIN_ID: u64 = 8453;
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const HARDHAT_CHAIN_ID: u64 = 31337;

static PUBLIC_BASE_SEPOLIA_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://sepolia.base.org"
        .parse()
        .expect("Invalid RPC URL")
});

static PUBLIC_BASE_MAINNET_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://mainnet.base.org"
        .parse()
        .expect("Invalid RPC URL")
});

static PUBLIC_ETHEREUM_MAINNET_HTTP_RPC_URL: LazyLock<reqwest::Url> =
    LazyLock::new(|| "https://eth.merkle.io".parse().expect("Invalid RPC URL"));

static PUBLIC_SEPOLIA_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "https://sepolia.drpc.org"
        .parse()
        .expect("Invalid RPC URL")
});

static LOCAL_HARDHAT_HTTP_RPC_URL: LazyLock<reqwest::Url> =
    LazyLock::new(|| "http://127.0.0.1:8545".parse().expect("Invalid RPC URL"));

// Should be updated when the token contract is redeployed!
const BASE_SEPOLIA_TOKEN_ADDRESS: Address = address!("3B1af0A5922e1228e57Ec2325f3e2D3E3C2935e9");

#[derive(Clone, Debug, PartialEq)]
pub struct CustomNetwork {
    pub rpc_url_http: reqwest::Url,
    /// Chain id the RPC endpoint is expected to report, if known.
    pub chain_id: Option<u64>,
}

impl CustomNetwork {
    pub fn new(rpc_url: &str, chain_id: Option<u64>) -> Result<Self, utils::Error> {
        let rpc_url_http = reqwest::Url::parse(rpc_url)
            .map_err(|err| utils::Error::FailedToGetEvmNetwork(format!("Invalid RPC URL: {err}")))?;
        Ok(Self {
            rpc_url_http,
            chain_id,
        })
    }
}

/// The chains the token can be sent on.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Network {
    #[default]
    BaseSepolia,
    BaseMainnet,
    EthereumMainnet,
    Sepolia,
    Hardhat,
    Custom(CustomNetwork),
}

impl Network {
    pub fn identifier(&self) -> &str {
        match self {
            Network::BaseSepolia => "base-sepolia",
            Network::BaseMainnet => "base",
            Network::EthereumMainnet => "ethereum",
            Network::Sepolia => "sepolia",
            Network::Hardhat => "hardhat",
            Network::Custom(_) => "custom",
        }
    }

    /// The chain id we expect the RPC endpoint to report.
    /// `None` for a custom network that was configured without one.
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Network::BaseSepolia => Some(BASE_SEPOLIA_CHAIN_ID),
            Network::BaseMainnet => Some(BASE_MAINNET_CHAIN_ID),
            Network::EthereumMainnet => Some(ETHEREUM_MAINNET_CHAIN_ID),
            Network::Sepolia => Some(SEPOLIA_CHAIN_ID),
            Network::Hardhat => Some(HARDHAT_CHAIN_ID),
            Network::Custom(custom) => custom.chain_id,
        }
    }

    pub fn rpc_url(&self) -> &reqwest::Url {
        match self {
            Network::BaseSepolia => &PUBLIC_BASE_SEPOLIA_HTTP_RPC_URL,
            Network::BaseMainnet => &PUBLIC_BASE_MAINNET_HTTP_RPC_URL,
            Network::EthereumMainnet => &PUBLIC_ETHEREUM_MAINNET_HTTP_RPC_URL,
            Network::Sepolia => &PUBLIC_SEPOLIA_HTTP_RPC_URL,
            Network::Hardhat => &LOCAL_HARDHAT_HTTP_RPC_URL,
            Network::Custom(custom) => &custom.rpc_url_http,
        }
    }

    /// The token contract known to be deployed on this network, if any.
    pub fn default_token_address(&self) -> Option<Address> {
        match self {
            Network::BaseSepolia => Some(BASE_SEPOLIA_TOKEN_ADDRESS),
            _ => None,
        }
    }

    fn explorer_base_url(&self) -> Option<&'static str> {
        match self {
            Network::BaseSepolia => Some("https://sepolia.basescan.org"),
            Network::BaseMainnet => Some("https://basescan.org"),
            Network::EthereumMainnet => Some("https://etherscan.io"),
            Network::Sepolia => Some("https://sepolia.etherscan.io"),
            Network::Hardhat | Network::Custom(_) => None,
        }
    }

    /// Link to the block explorer page of an address (contract or account).
    pub fn explorer_address_url(&self, address: &Address) -> Option<String> {
        self.explorer_base_url()
            .map(|base| format!("{base}/address/{address}"))
    }

    pub fn explorer_tx_url(&self, tx_hash: &common::TxHash) -> Option<String> {
        self.explorer_base_url()
            .map(|base| format!("{base}/tx/{tx_hash}"))
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Network::Custom(custom) => write!(f, "custom ({})", custom.rpc_url_http),
            named => write!(f, "{}", chain_name(named.chain_id().unwrap_or_default())),
        }
    }
}

impl FromStr for Network {
    type Err = utils::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "base-sepolia" => Ok(Network::BaseSepolia),
            "base" | "base-mainnet" => Ok(Network::BaseMainnet),
            "ethereum" | "mainnet" => Ok(Network::EthereumMainnet),
            "sepolia" => Ok(Network::Sepolia),
            "hardhat" | "local" => Ok(Network::Hardhat),
            other => Err(utils::Error::FailedToGetEvmNetwork(format!(
                "unknown network '{other}', expected one of: base-sepolia, base, ethereum, sepolia, hardhat"
            ))),
        }
    }
}

/// Human readable name for a chain id.
pub fn chain_name(chain_id: u64) -> String {
    match chain_id {
        BASE_SEPOLIA_CHAIN_ID => "Base Sepolia".to_string(),
        BASE_MAINNET_CHAIN_ID => "Base Mainnet".to_string(),
        ETHEREUM_MAINNET_CHAIN_ID => "Ethereum Mainnet".to_string(),
        SEPOLIA_CHAIN_ID => "Sepolia".to_string(),
        HARDHAT_CHAIN_ID => "Hardhat".to_string(),
        other => format!("Unknown ({other})"),
    }
}

/// A token contract on a given network.
#[derive(Clone, Debug, PartialEq)]
pub struct Deployment {
    pub network: Network,
    pub token_address: Address,
}

impl Deployment {
    pub fn new(network: Network, token_address: Address) -> Self {
        Self {
            network,
            token_address,
        }
    }

    /// Uses the token contract known for the network, if there is one.
    pub fn for_network(network: Network) -> Option<Self> {
        network
            .default_token_address()
            .map(|token_address| Self::new(network, token_address))
    }

    pub fn explorer_url(&self) -> Option<String> {
        self.network.explorer_address_url(&self.token_address)
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new(Network::BaseSepolia, BASE_SEPOLIA_TOKEN_ADDRESS)
    }
}
