// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use classdrop_batch::TokenAmount;
use classdrop_evm::token_info::token_info;
use classdrop_evm::Deployment;
use color_eyre::eyre::Context;
use color_eyre::{Result, Section};

pub async fn info(deployment: &Deployment) -> Result<()> {
    let info = token_info(deployment)
        .await
        .wrap_err("Failed to fetch the token info")
        .with_suggestion(|| format!("make sure the token contract is deployed on {}", deployment.network))?;

    println!("Token: {} ({})", info.name, info.symbol);
    println!("Decimals: {}", info.decimals);
    println!(
        "Total supply: {} {}",
        TokenAmount::from_base_units(info.total_supply, info.decimals),
        info.symbol
    );
    println!("Contract: {}", info.address);
    if let Some(url) = deployment.explorer_url() {
        println!("Explorer: {url}");
    }
    Ok(())
}
