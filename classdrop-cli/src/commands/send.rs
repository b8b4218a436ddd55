// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::access::keys::load_evm_wallet;
use crate::commands::RecipientArgs;
use classdrop_batch::{
    submit_form, AddressCheck, BatchError, SendForm, TransferPlan, DEFAULT_BULK_DELIMITERS,
    MAX_RECIPIENTS,
};
use classdrop_evm::common::TxHash;
use classdrop_evm::token_info::token_info;
use classdrop_evm::Deployment;
use color_eyre::eyre::{eyre, Context};
use color_eyre::{Result, Section};

pub async fn send(
    amount: &str,
    recipients: RecipientArgs,
    dry_run: bool,
    strict_addresses: bool,
    deployment: Deployment,
) -> Result<()> {
    let check = if strict_addresses {
        AddressCheck::Checksummed
    } else {
        AddressCheck::Shape
    };
    let mut form = SendForm::new(check);
    fill_recipients(&mut form, recipients).await?;
    form.set_amount(amount);

    for (index, entry) in invalid_entries(&form) {
        println!("Skipping invalid address #{}: {entry:?}", index + 1);
    }

    let token = token_info(&deployment)
        .await
        .inspect_err(|err| error!("Could not fetch token info: {err}"))
        .ok();
    let decimals = token.as_ref().map(|token| token.decimals);
    let symbol = token.map(|token| token.symbol).unwrap_or_default();

    let plan = form
        .try_summary(decimals)
        .map_err(|err| eyre!(err.user_message()))
        .wrap_err("Nothing can be sent")
        .with_suggestion(|| "provide at least one valid address and an amount greater than zero")?;
    print_summary(&plan, &symbol);

    if dry_run {
        println!("Dry run, no transaction was sent.");
        return Ok(());
    }

    let wallet = load_evm_wallet(deployment.clone())?;
    println!("Sending from {} on {}...", wallet.address(), deployment.network);

    let tx_hash = match submit_form(&mut form, &wallet, &wallet).await {
        Ok(tx_hash) => tx_hash,
        Err(BatchError::Unconfirmed(tx_hash)) => {
            print_transaction(&deployment, &tx_hash);
            return Err(eyre!(BatchError::Unconfirmed(tx_hash).user_message()))
                .wrap_err("The batch transfer was not confirmed in time")
                .with_suggestion(|| "look the transaction up before sending again");
        }
        Err(err) => {
            return Err(eyre!(err.user_message()))
                .wrap_err("The batch transfer failed")
                .with_suggestion(|| {
                    "check the wallet holds enough tokens and gas, then try again"
                });
        }
    };

    println!("Sent tokens to {} classmates!", plan.recipient_count());
    print_transaction(&deployment, &tx_hash);
    Ok(())
}

fn print_transaction(deployment: &Deployment, tx_hash: &TxHash) {
    match deployment.network.explorer_tx_url(tx_hash) {
        Some(url) => println!("Transaction: {url}"),
        None => println!("Transaction: {tx_hash}"),
    }
}

async fn fill_recipients(form: &mut SendForm, recipients: RecipientArgs) -> Result<()> {
    let bulk_text = match (recipients.bulk, recipients.bulk_file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .wrap_err(format!("Failed to read the addresses from {path:?}"))?,
        (None, None) => {
            fill_slots(form, &recipients.to);
            return Ok(());
        }
    };

    let entries = bulk_text
        .split(&DEFAULT_BULK_DELIMITERS[..])
        .filter(|entry| !entry.trim().is_empty())
        .count();
    if entries > MAX_RECIPIENTS {
        println!("Only the first {MAX_RECIPIENTS} of {entries} addresses are used");
    }

    form.toggle_mode();
    form.set_bulk_text(bulk_text);
    form.commit_bulk();
    Ok(())
}

fn fill_slots(form: &mut SendForm, addresses: &[String]) {
    for (index, address) in addresses.iter().enumerate() {
        if index > 0 && !form.add_slot() {
            println!(
                "Only the first {MAX_RECIPIENTS} of {} addresses are used",
                addresses.len()
            );
            break;
        }
        form.update_slot(index, address.as_str());
    }
}

fn invalid_entries(form: &SendForm) -> Vec<(usize, &str)> {
    form.malformed_slots()
        .into_iter()
        .filter_map(|index| form.slots().get(index).map(|entry| (index, entry.as_str())))
        .collect()
}

fn print_summary(plan: &TransferPlan, symbol: &str) {
    println!("Transaction summary");
    println!("  Recipients: {}", plan.recipient_count());
    for recipient in &plan.recipients {
        println!("    {}", recipient.as_str());
    }
    println!("  Amount per recipient: {} {symbol}", plan.amount_each());
    println!("  Total amount: {} {symbol}", plan.total());
}
