// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use alloy::hex::{self, ToHexExt};
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use classdrop_evm::{CustomNetwork, Deployment, Network, HARDHAT_CHAIN_ID};

/// Init code of a contract that answers every call with the word `18`.
/// Enough to stand in for a token with 18 decimals that accepts `sendToClassmates`.
pub const ANSWERING_TOKEN_INIT_CODE: &str = "69601260005260206000f3600052600a6016f3";

/// Init code of a contract that reverts on every call.
pub const REVERTING_TOKEN_INIT_CODE: &str = "6460006000fd6000526005601bf3";

/// Runs an Anvil node.
pub async fn start_anvil_node() -> eyre::Result<AnvilInstance> {
    // Requires Foundry: https://book.getfoundry.sh/getting-started/installation
    let anvil = Anvil::new().try_spawn()?;
    println!("Anvil running at `{}`", anvil.endpoint());
    Ok(anvil)
}

/// Anvil if it can be started, otherwise `None` and the calling test is skipped.
pub async fn local_chain() -> Option<AnvilInstance> {
    match start_anvil_node().await {
        Ok(anvil) => Some(anvil),
        Err(err) => {
            println!("Skipping, could not start anvil: {err}");
            None
        }
    }
}

/// Hex private key of the first funded Anvil account.
pub fn funded_private_key(anvil: &AnvilInstance) -> String {
    let signer: PrivateKeySigner = anvil.keys()[0].clone().into();
    signer.to_bytes().encode_hex_with_prefix()
}

pub fn local_network(anvil: &AnvilInstance, chain_id: Option<u64>) -> Network {
    Network::Custom(CustomNetwork::new(&anvil.endpoint(), chain_id).expect("valid anvil url"))
}

pub fn local_deployment(anvil: &AnvilInstance, token_address: Address) -> Deployment {
    Deployment::new(local_network(anvil, Some(HARDHAT_CHAIN_ID)), token_address)
}

/// Deploys raw init code from the first Anvil account and returns the contract address.
pub async fn deploy(anvil: &AnvilInstance, init_code: &str) -> eyre::Result<Address> {
    let signer: PrivateKeySigner = anvil.keys()[0].clone().into();
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(anvil.endpoint().parse()?);

    let tx = TransactionRequest::default().with_deploy_code(hex::decode(init_code)?);
    let receipt = provider.send_transaction(tx).await?.get_receipt().await?;
    receipt
        .contract_address
        .ok_or_else(|| eyre::eyre!("Deployment receipt has no contract address"))
}
