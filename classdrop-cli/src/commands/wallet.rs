// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::access::keys::{load_evm_wallet, store_secret_key};
use classdrop_batch::TokenAmount;
use classdrop_evm::common::Address;
use classdrop_evm::token_info::token_info;
use classdrop_evm::wallet::{balance_of_gas_tokens, balance_of_tokens, Wallet};
use classdrop_evm::Deployment;
use color_eyre::eyre::{eyre, Context};
use color_eyre::{Result, Section};
use std::str::FromStr;

const GAS_TOKEN_DECIMALS: u8 = 18;

pub fn create(save: bool) -> Result<()> {
    let private_key = Wallet::random_private_key();
    let wallet = Wallet::new_from_private_key(Deployment::default(), &private_key)
        .map_err(|err| eyre!("Generated an unusable private key: {err}"))?;

    println!("Wallet address: {}", wallet.address());
    if save {
        let file_path = store_secret_key(&private_key)?;
        println!("Stored private key in: {file_path:?}");
    } else {
        println!("Private key: {private_key}");
        println!("Keep it secret, anyone with this key controls the wallet.");
    }
    Ok(())
}

pub async fn balance(address: Option<String>, deployment: &Deployment) -> Result<()> {
    let account = match address {
        Some(address) => Address::from_str(address.trim())
            .wrap_err("Please provide a valid address")
            .with_suggestion(|| "an address looks like 0x followed by 40 hex characters")?,
        None => load_evm_wallet(deployment.clone())?.address(),
    };

    let (info, tokens, gas) = tokio::try_join!(
        async { token_info(deployment).await.wrap_err("Failed to fetch the token info") },
        async {
            balance_of_tokens(account, deployment)
                .await
                .wrap_err("Failed to fetch the token balance")
        },
        async {
            balance_of_gas_tokens(account, &deployment.network)
                .await
                .wrap_err("Failed to fetch the gas balance")
        },
    )?;

    println!("Address: {account}");
    println!(
        "Token balance: {} {}",
        TokenAmount::from_base_units(tokens, info.decimals),
        info.symbol
    );
    println!(
        "Gas balance: {} ETH",
        TokenAmount::from_base_units(gas, GAS_TOKEN_DECIMALS)
    );
    Ok(())
}
