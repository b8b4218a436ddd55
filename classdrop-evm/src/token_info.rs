// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, U256};
use crate::contract::token::{self, TokenHandler};
use crate::utils::http_provider;
use crate::Deployment;

/// Metadata of the token contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Raw total supply, in base units.
    pub total_supply: U256,
}

/// Fetch name, symbol, decimals and total supply of the deployment's token.
pub async fn token_info(deployment: &Deployment) -> Result<TokenInfo, token::Error> {
    let provider = http_provider(deployment.network.rpc_url().clone());
    let token = TokenHandler::new(deployment.token_address, provider);

    let (name, symbol, decimals, total_supply) = tokio::try_join!(
        token.name(),
        token.symbol(),
        token.decimals(),
        token.total_supply()
    )?;
    debug!("Fetched token info of {}: {name} ({symbol})", deployment.token_address);

    Ok(TokenInfo {
        address: deployment.token_address,
        name,
        symbol,
        decimals,
        total_supply,
    })
}
