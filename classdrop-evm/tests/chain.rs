// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod common;

use crate::common::{
    deploy, funded_private_key, local_chain, local_deployment, local_network,
    ANSWERING_TOKEN_INIT_CODE, REVERTING_TOKEN_INIT_CODE,
};
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{address, Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use classdrop_evm::contract::token;
use classdrop_evm::status::network_status;
use classdrop_evm::token_info::token_info;
use classdrop_evm::wallet::{self, balance_of_gas_tokens, balance_of_tokens, Wallet};
use classdrop_evm::{Deployment, HARDHAT_CHAIN_ID};
use std::time::Duration;

const CLASSMATES: [Address; 2] = [
    address!("00000000000000000000000000000000000000a1"),
    address!("00000000000000000000000000000000000000a2"),
];

const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::test]
async fn network_status_reports_the_anvil_chain() {
    let Some(anvil) = local_chain().await else {
        return;
    };

    let status = network_status(&local_network(&anvil, Some(HARDHAT_CHAIN_ID)))
        .await
        .expect("chain id from anvil");
    assert_eq!(status.current_chain_id, HARDHAT_CHAIN_ID);
    assert!(status.is_correct_network());

    let status = network_status(&local_network(&anvil, Some(1)))
        .await
        .expect("chain id from anvil");
    assert!(!status.is_correct_network());
    assert_eq!(status.expected_chain_id, Some(1));
}

#[tokio::test]
async fn sending_on_the_wrong_chain_is_refused() {
    let Some(anvil) = local_chain().await else {
        return;
    };
    let token_address = deploy(&anvil, ANSWERING_TOKEN_INIT_CODE)
        .await
        .expect("token deployed");
    let deployment = Deployment::new(local_network(&anvil, Some(1)), token_address);
    let wallet = Wallet::new_from_private_key(deployment, &funded_private_key(&anvil))
        .expect("anvil key is valid");

    let result = wallet
        .send_to_classmates(CLASSMATES.to_vec(), U256::from(1))
        .await;

    assert!(matches!(
        result,
        Err(wallet::Error::WrongNetwork { expected: 1, .. })
    ));
}

#[tokio::test]
async fn batch_transfer_is_sent_and_confirmed() {
    let Some(anvil) = local_chain().await else {
        return;
    };
    let token_address = deploy(&anvil, ANSWERING_TOKEN_INIT_CODE)
        .await
        .expect("token deployed");
    let wallet = Wallet::new_from_private_key(
        local_deployment(&anvil, token_address),
        &funded_private_key(&anvil),
    )
    .expect("anvil key is valid");

    assert_eq!(wallet.token_decimals().await.expect("decimals"), 18);

    let tx_hash = wallet
        .send_to_classmates(CLASSMATES.to_vec(), U256::from(5))
        .await
        .expect("batch transfer sent");
    wallet
        .wait_for_confirmation(tx_hash, CONFIRMATION_TIMEOUT)
        .await
        .expect("batch transfer confirmed");
}

#[tokio::test]
async fn balances_are_read_from_the_chain() {
    let Some(anvil) = local_chain().await else {
        return;
    };
    let token_address = deploy(&anvil, ANSWERING_TOKEN_INIT_CODE)
        .await
        .expect("token deployed");
    let deployment = local_deployment(&anvil, token_address);
    let account = anvil.addresses()[0];

    let tokens = balance_of_tokens(account, &deployment)
        .await
        .expect("token balance");
    assert_eq!(tokens, U256::from(18));

    let gas = balance_of_gas_tokens(account, &deployment.network)
        .await
        .expect("gas balance");
    assert!(gas > U256::ZERO);
}

#[tokio::test]
async fn token_info_fails_when_the_contract_is_not_a_token() {
    let Some(anvil) = local_chain().await else {
        return;
    };
    let token_address = deploy(&anvil, REVERTING_TOKEN_INIT_CODE)
        .await
        .expect("contract deployed");

    assert!(token_info(&local_deployment(&anvil, token_address))
        .await
        .is_err());
}

#[tokio::test]
async fn reverted_transfer_is_reported_as_reverted() {
    let Some(anvil) = local_chain().await else {
        return;
    };
    let token_address = deploy(&anvil, REVERTING_TOKEN_INIT_CODE)
        .await
        .expect("contract deployed");
    let private_key = funded_private_key(&anvil);

    // A fixed gas limit skips estimation, so the reverting call still gets mined.
    let signer: PrivateKeySigner = private_key.parse().expect("anvil key is valid");
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(anvil.endpoint().parse().expect("valid anvil url"));
    let tx = TransactionRequest::default()
        .with_to(token_address)
        .with_gas_limit(100_000);
    let pending = provider.send_transaction(tx).await.expect("tx sent");
    let tx_hash = *pending.tx_hash();

    let wallet =
        Wallet::new_from_private_key(local_deployment(&anvil, token_address), &private_key)
            .expect("anvil key is valid");
    let result = wallet
        .wait_for_confirmation(tx_hash, CONFIRMATION_TIMEOUT)
        .await;

    assert!(matches!(
        result,
        Err(wallet::Error::TokenError(token::Error::TransactionReverted(hash))) if hash == tx_hash
    ));
}
