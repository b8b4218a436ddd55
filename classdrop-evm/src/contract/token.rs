// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, TxHash, U256};
use crate::contract::token::IClassmateToken::IClassmateTokenInstance;
use alloy::network::{Network, ReceiptResponse};
use alloy::providers::{PendingTransactionBuilder, Provider};
use alloy::sol;
use alloy::transports::{RpcError, Transport, TransportErrorKind};
use std::time::Duration;

sol!(
    #[allow(clippy::too_many_arguments)]
    #[allow(missing_docs)]
    #[sol(rpc)]
    IClassmateToken,
    "abi/IClassmateToken.json"
);

/// Pause before looking up a receipt again after the lookup failed.
const RECEIPT_RETRY_INTERVAL: Duration = Duration::from_millis(1500);

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ContractError(#[from] alloy::contract::Error),
    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
    #[error("Transaction {0} was reverted")]
    TransactionReverted(TxHash),
    #[error("Transaction {0} was not confirmed in time, it may still be mined")]
    ConfirmationTimeout(TxHash),
}

pub struct TokenHandler<T: Transport + Clone, P: Provider<T, N>, N: Network> {
    pub contract: IClassmateTokenInstance<T, P, N>,
}

impl<T, P, N> TokenHandler<T, P, N>
where
    T: Transport + Clone,
    P: Provider<T, N>,
    N: Network,
{
    /// Create a new TokenHandler instance from the token contract's address.
    pub fn new(contract_address: Address, provider: P) -> Self {
        let contract = IClassmateToken::new(contract_address, provider);
        TokenHandler { contract }
    }

    pub async fn name(&self) -> Result<String, Error> {
        let name = self
            .contract
            .name()
            .call()
            .await
            .inspect_err(|err| error!("Error getting token name: {err:?}"))?
            ._0;
        Ok(name)
    }

    pub async fn symbol(&self) -> Result<String, Error> {
        let symbol = self
            .contract
            .symbol()
            .call()
            .await
            .inspect_err(|err| error!("Error getting token symbol: {err:?}"))?
            ._0;
        Ok(symbol)
    }

    /// The decimal precision of the token. Human amounts are `raw / 10^decimals`.
    pub async fn decimals(&self) -> Result<u8, Error> {
        let decimals = self
            .contract
            .decimals()
            .call()
            .await
            .inspect_err(|err| error!("Error getting token decimals: {err:?}"))?
            ._0;
        debug!("Token decimals: {decimals}");
        Ok(decimals)
    }

    /// Get the raw total supply of the token.
    pub async fn total_supply(&self) -> Result<U256, Error> {
        let total_supply = self
            .contract
            .totalSupply()
            .call()
            .await
            .inspect_err(|err| error!("Error getting token total supply: {err:?}"))?
            ._0;
        Ok(total_supply)
    }

    /// Get the raw token balance of an address.
    pub async fn balance_of(&self, account: Address) -> Result<U256, Error> {
        debug!("Getting balance of account: {account:?}");
        let balance = self
            .contract
            .balanceOf(account)
            .call()
            .await
            .inspect_err(|err| error!("Error getting balance of account: {err:?}"))?
            ._0;
        debug!("Balance of account: {account} is {balance}");
        Ok(balance)
    }

    /// Send the same raw amount of tokens to every classmate in a single transaction.
    /// Returns as soon as the transaction is pending, use `wait_for_receipt` to confirm it.
    pub async fn send_to_classmates(
        &self,
        classmates: Vec<Address>,
        amount_each: U256,
    ) -> Result<TxHash, Error> {
        let count = classmates.len();
        debug!("Sending raw amt of tokens: {amount_each} to each of {count} classmates");
        let call = self.contract.sendToClassmates(classmates, amount_each);
        let pending_tx_builder = call.send().await.inspect_err(|err| {
            error!("Error sending raw amt of tokens {amount_each} to {count} classmates: {err:?}")
        })?;

        let tx_hash = *pending_tx_builder.tx_hash();
        debug!("The transfer to {count} classmates is pending with tx_hash: {tx_hash:?}");
        Ok(tx_hash)
    }

    /// Wait until the transaction is mined, then check it succeeded.
    ///
    /// Failed receipt lookups are retried until `timeout` elapses, as the transaction may still
    /// be mined while the RPC endpoint misbehaves. Running out of time is reported as
    /// `ConfirmationTimeout`, which says nothing about whether the transaction went through.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash, timeout: Duration) -> Result<(), Error> {
        let receipt = tokio::time::timeout(timeout, self.receipt_with_retries(tx_hash))
            .await
            .map_err(|_| {
                warn!("Gave up waiting for tx with hash {tx_hash:?} after {timeout:?}");
                Error::ConfirmationTimeout(tx_hash)
            })?;

        if !receipt.status() {
            error!("Tx with hash {tx_hash:?} was reverted");
            return Err(Error::TransactionReverted(tx_hash));
        }
        debug!("Tx with hash {tx_hash:?} is confirmed");
        Ok(())
    }

    async fn receipt_with_retries(&self, tx_hash: TxHash) -> N::ReceiptResponse {
        loop {
            let pending_tx_builder =
                PendingTransactionBuilder::new(self.contract.provider().root().clone(), tx_hash);
            match pending_tx_builder.get_receipt().await {
                Ok(receipt) => return receipt,
                Err(err) => {
                    warn!("Could not get the receipt of tx with hash {tx_hash:?}, retrying: {err}");
                    tokio::time::sleep(RECEIPT_RETRY_INTERVAL).await;
                }
            }
        }
    }
}
