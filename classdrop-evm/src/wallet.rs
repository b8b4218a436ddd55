// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Amount, EthereumWallet, TxHash, U256};
use crate::contract::token::{self, TokenHandler};
use crate::status::{self, network_status};
use crate::utils::{http_provider, http_provider_with_wallet};
use crate::{Deployment, Network};
use alloy::hex::ToHexExt;
use alloy::network::{Ethereum, NetworkWallet};
use alloy::providers::Provider;
use alloy::signers::local::{LocalSigner, PrivateKeySigner};
use alloy::transports::{RpcError, TransportErrorKind};
use std::time::Duration;

/// How long to wait for a batch transfer to be mined.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Private key is invalid")]
    PrivateKeyInvalid,
    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
    #[error(transparent)]
    TokenError(#[from] token::Error),
    #[error(transparent)]
    StatusError(#[from] status::Error),
    #[error("Connected to {current} but the selected network expects chain id {expected}")]
    WrongNetwork { expected: u64, current: String },
    #[error("There are no recipients to send tokens to")]
    NoRecipients,
}

#[derive(Clone)]
pub struct Wallet {
    wallet: EthereumWallet,
    deployment: Deployment,
}

impl Wallet {
    /// Creates a new Wallet object with the specific EthereumWallet.
    pub fn new(deployment: Deployment, wallet: EthereumWallet) -> Self {
        Self { wallet, deployment }
    }

    /// Creates a new Wallet based on the given private_key. It will fail with Error::PrivateKeyInvalid if private_key is invalid.
    pub fn new_from_private_key(deployment: Deployment, private_key: &str) -> Result<Self, Error> {
        let wallet = from_private_key(private_key)?;
        Ok(Self::new(deployment, wallet))
    }

    /// Generate a new hex encoded private key.
    pub fn random_private_key() -> String {
        let signer: PrivateKeySigner = LocalSigner::random();
        signer.to_bytes().encode_hex_with_prefix()
    }

    /// Returns the address of this wallet.
    pub fn address(&self) -> Address {
        wallet_address(&self.wallet)
    }

    pub fn network(&self) -> &Network {
        &self.deployment.network
    }

    /// The decimal precision of the wallet's token.
    pub async fn token_decimals(&self) -> Result<u8, Error> {
        let provider = http_provider(self.network().rpc_url().clone());
        let token = TokenHandler::new(self.deployment.token_address, provider);
        Ok(token.decimals().await?)
    }

    /// Send `amount_each` raw tokens to every classmate in one transaction.
    /// Refuses to send when the RPC endpoint is on another chain than the selected network.
    pub async fn send_to_classmates(
        &self,
        classmates: Vec<Address>,
        amount_each: Amount,
    ) -> Result<TxHash, Error> {
        if classmates.is_empty() {
            return Err(Error::NoRecipients);
        }

        let status = network_status(self.network()).await?;
        if let (false, Some(expected)) = (status.is_correct_network(), status.expected_chain_id) {
            return Err(Error::WrongNetwork {
                expected,
                current: status.current_network_name(),
            });
        }

        let provider =
            http_provider_with_wallet(self.network().rpc_url().clone(), self.wallet.clone());
        let token = TokenHandler::new(self.deployment.token_address, provider);
        let tx_hash = token.send_to_classmates(classmates, amount_each).await?;
        info!("Batch transfer submitted with tx_hash: {tx_hash:?}");
        Ok(tx_hash)
    }

    /// Wait until the transaction is mined and succeeded.
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
    ) -> Result<(), Error> {
        let provider = http_provider(self.network().rpc_url().clone());
        let token = TokenHandler::new(self.deployment.token_address, provider);
        token.wait_for_receipt(tx_hash, timeout).await?;
        info!("Batch transfer with tx_hash {tx_hash:?} is confirmed");
        Ok(())
    }
}

/// Creates a wallet from a private key in HEX format.
fn from_private_key(private_key: &str) -> Result<EthereumWallet, Error> {
    let signer: PrivateKeySigner = private_key.trim().parse().map_err(|err| {
        error!("Error parsing private key: {err}");
        Error::PrivateKeyInvalid
    })?;
    Ok(EthereumWallet::from(signer))
}

/// Returns the address of this wallet.
pub fn wallet_address(wallet: &EthereumWallet) -> Address {
    <EthereumWallet as NetworkWallet<Ethereum>>::default_signer_address(wallet)
}

/// Returns the raw balance of payment tokens for this wallet.
pub async fn balance_of_tokens(account: Address, deployment: &Deployment) -> Result<U256, Error> {
    info!("Getting balance of tokens for account: {account}");
    let provider = http_provider(deployment.network.rpc_url().clone());
    let token = TokenHandler::new(deployment.token_address, provider);
    Ok(token.balance_of(account).await?)
}

/// Returns the raw balance of gas tokens for this wallet.
pub async fn balance_of_gas_tokens(account: Address, network: &Network) -> Result<U256, Error> {
    debug!("Getting balance of gas tokens for account: {account}");
    let provider = http_provider(network.rpc_url().clone());
    let balance = provider.get_balance(account).await?;
    Ok(balance)
}
