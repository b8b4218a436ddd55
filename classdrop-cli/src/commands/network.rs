// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use classdrop_evm::status::network_status;
use classdrop_evm::Network;
use color_eyre::eyre::Context;
use color_eyre::{Result, Section};

pub async fn status(network: &Network) -> Result<()> {
    let status = network_status(network)
        .await
        .wrap_err(format!("Failed to reach the RPC endpoint at {}", network.rpc_url()))
        .with_suggestion(|| "check your connection or use another RPC_URL")?;

    println!("Selected network: {network}");
    println!("Connected to: {}", status.current_network_name());
    match status.expected_network_name() {
        Some(expected) if !status.is_correct_network() => {
            println!("Wrong network, please switch to {expected}");
        }
        Some(_) => println!("Connected to the correct network"),
        None => println!("No chain id configured, any chain is accepted"),
    }
    Ok(())
}
