// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use classdrop_evm::utils::{
    get_deployment_from_env, get_evm_network_from_env, parse_token_address, EVM_NETWORK,
    RPC_URL, TOKEN_CONTRACT_ADDRESS,
};
use classdrop_evm::{Deployment, Network};
use color_eyre::eyre::Context;
use color_eyre::Result;
use color_eyre::Section;

/// The `--network` flag wins over the environment.
pub fn get_network(network: Option<Network>) -> Result<Network> {
    match network {
        Some(network) => Ok(network),
        None => get_evm_network_from_env()
            .wrap_err("Could not select an EVM network")
            .with_suggestion(|| format!("pick a network with --network or the {EVM_NETWORK} env var"))
            .with_suggestion(|| format!("or set {RPC_URL} to use a custom RPC endpoint")),
    }
}

/// The `--token` flag wins over the environment and the network's known token.
pub fn get_deployment(network: Network, token: Option<String>) -> Result<Deployment> {
    match token {
        Some(token) => {
            let token_address =
                parse_token_address(&token).wrap_err("Please provide a valid token address")?;
            Ok(Deployment::new(network, token_address))
        }
        None => get_deployment_from_env(network)
            .wrap_err("Could not find the token contract")
            .with_suggestion(|| {
                format!("provide the token contract with --token or the {TOKEN_CONTRACT_ADDRESS} env var")
            }),
    }
}
