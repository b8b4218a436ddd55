// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod network;
mod send;
mod token;
mod wallet;

use clap::{Args, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;

use crate::opt::Opt;

#[derive(Subcommand, Debug)]
pub enum SubCmd {
    /// Operations related to the token contract.
    Token {
        #[command(subcommand)]
        command: TokenCmd,
    },

    /// Operations related to wallet management.
    Wallet {
        #[command(subcommand)]
        command: WalletCmd,
    },

    /// Operations related to the EVM network.
    Network {
        #[command(subcommand)]
        command: NetworkCmd,
    },

    /// Send the same amount of tokens to each of up to 11 classmates in one transaction.
    Send {
        /// The amount each classmate receives, in whole tokens, e.g. "1.5".
        #[arg(long)]
        amount: String,

        #[command(flatten)]
        recipients: RecipientArgs,

        /// Only show what would be sent.
        #[arg(long)]
        dry_run: bool,

        /// Also require the addresses to be valid hex with a correct EIP-55 checksum.
        #[arg(long)]
        strict_addresses: bool,
    },
}

/// Where the recipient addresses come from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct RecipientArgs {
    /// A recipient address. Can be repeated.
    #[arg(long)]
    pub to: Vec<String>,

    /// Recipient addresses separated by newlines, commas or semicolons.
    #[arg(long)]
    pub bulk: Option<String>,

    /// A file with recipient addresses separated by newlines, commas or semicolons.
    #[arg(long)]
    pub bulk_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum TokenCmd {
    /// Show the name, symbol, decimals and total supply of the token.
    Info,
}

#[derive(Subcommand, Debug)]
pub enum WalletCmd {
    /// Create a new random wallet
    Create {
        /// Store the private key in the client data dir, where `send` will find it.
        #[arg(long)]
        save: bool,
    },

    /// Check the token balance of a wallet
    Balance {
        /// The address to check. Defaults to the wallet of your `SECRET_KEY`.
        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NetworkCmd {
    /// Check which chain the RPC endpoint is on.
    Status,
}

pub async fn handle_subcommand(opt: Opt) -> Result<()> {
    let network = crate::access::network::get_network(opt.network)?;
    let token = opt.token;

    match opt.command {
        SubCmd::Token { command } => match command {
            TokenCmd::Info => {
                let deployment = crate::access::network::get_deployment(network, token)?;
                token::info(&deployment).await
            }
        },
        SubCmd::Wallet { command } => match command {
            WalletCmd::Create { save } => wallet::create(save),
            WalletCmd::Balance { address } => {
                let deployment = crate::access::network::get_deployment(network, token)?;
                wallet::balance(address, &deployment).await
            }
        },
        SubCmd::Network { command } => match command {
            NetworkCmd::Status => network::status(&network).await,
        },
        SubCmd::Send {
            amount,
            recipients,
            dry_run,
            strict_addresses,
        } => {
            let deployment = crate::access::network::get_deployment(network, token)?;
            send::send(&amount, recipients, dry_run, strict_addresses, deployment).await
        }
    }
}
