// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use async_trait::async_trait;
use classdrop_batch::{
    submit_form, BatchError, DecimalsProvider, Result, SendForm, SubmissionState,
    TransactionSubmitter,
};
use classdrop_evm::common::{Address, Amount, TxHash};
use mockall::mock;
use mockall::predicate::*;
use std::str::FromStr;

mock! {
    pub Decimals {}
    #[async_trait]
    impl DecimalsProvider for Decimals {
        async fn decimals(&self) -> Result<u8>;
    }
}

mock! {
    pub Submitter {}
    #[async_trait]
    impl TransactionSubmitter for Submitter {
        async fn send_batch(&self, recipients: Vec<Address>, amount_each: Amount) -> Result<TxHash>;
        async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()>;
    }
}

fn addr(n: u8) -> String {
    format!("0x{n:040x}")
}

fn filled_form(amount: &str, count: u8) -> SendForm {
    let mut form = SendForm::default();
    for n in 1..=count {
        if n > 1 {
            assert!(form.add_slot());
        }
        assert!(form.update_slot(usize::from(n - 1), addr(n)));
    }
    form.set_amount(amount);
    form
}

fn decimals(value: u8) -> MockDecimals {
    let mut mock_decimals = MockDecimals::new();
    mock_decimals
        .expect_decimals()
        .returning(move || Ok(value));
    mock_decimals
}

#[tokio::test]
async fn submits_plan_and_resets_the_form() -> eyre::Result<()> {
    let tx_hash = TxHash::with_last_byte(0xab);
    let mut form = filled_form("1.5", 3);
    let mut mock_submitter = MockSubmitter::new();

    let expected_recipients: Vec<Address> = (1..=3).map(Address::with_last_byte).collect();
    mock_submitter
        .expect_send_batch()
        .with(
            eq(expected_recipients),
            eq(Amount::from_str("1500000000000000000")?),
        )
        .times(1)
        .returning(move |_, _| Ok(tx_hash));
    mock_submitter
        .expect_wait_for_confirmation()
        .with(eq(tx_hash))
        .times(1)
        .returning(|_| Ok(()));

    let submitted = submit_form(&mut form, &decimals(18), &mock_submitter).await?;

    assert_eq!(submitted, tx_hash);
    assert_eq!(form.submission(), &SubmissionState::Confirmed(tx_hash));
    assert_eq!(form.slots(), &[String::new()]);
    assert!(form.amount().is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_slots_are_left_out_of_the_batch() -> eyre::Result<()> {
    let tx_hash = TxHash::with_last_byte(1);
    let mut form = filled_form("2", 2);
    assert!(form.add_slot());
    assert!(form.update_slot(2, "abc123"));

    let mut mock_submitter = MockSubmitter::new();
    mock_submitter
        .expect_send_batch()
        .withf(|recipients, amount| recipients.len() == 2 && *amount == Amount::from(20u64))
        .times(1)
        .returning(move |_, _| Ok(tx_hash));
    mock_submitter
        .expect_wait_for_confirmation()
        .times(1)
        .returning(|_| Ok(()));

    submit_form(&mut form, &decimals(1), &mock_submitter).await?;
    Ok(())
}

#[tokio::test]
async fn nothing_is_sent_without_a_summary() {
    let mut mock_submitter = MockSubmitter::new();
    mock_submitter.expect_send_batch().times(0);
    mock_submitter.expect_wait_for_confirmation().times(0);

    let mut empty = filled_form("5", 0);
    assert_eq!(
        submit_form(&mut empty, &decimals(18), &mock_submitter).await,
        Err(BatchError::EmptyResult)
    );

    let mut zero = filled_form("0", 2);
    assert!(matches!(
        submit_form(&mut zero, &decimals(18), &mock_submitter).await,
        Err(BatchError::AmountOutOfRange(_))
    ));

    let mut unresolved = filled_form("1", 2);
    let mut mock_decimals = MockDecimals::new();
    mock_decimals
        .expect_decimals()
        .times(1)
        .returning(|| Err(BatchError::PrecisionUnavailable));
    assert_eq!(
        submit_form(&mut unresolved, &mock_decimals, &mock_submitter).await,
        Err(BatchError::PrecisionUnavailable)
    );
    assert_eq!(unresolved.submission(), &SubmissionState::Idle);
}

#[tokio::test]
async fn non_hex_address_is_caught_before_sending() {
    let mut form = SendForm::default();
    form.update_slot(0, format!("0x{}", "Z".repeat(40)));
    form.set_amount("1");
    assert!(form.summary(Some(18)).is_some());

    let mut mock_submitter = MockSubmitter::new();
    mock_submitter.expect_send_batch().times(0);

    let result = submit_form(&mut form, &decimals(18), &mock_submitter).await;
    assert!(matches!(result, Err(BatchError::MalformedAddress(_))));
    assert_eq!(form.submission(), &SubmissionState::Idle);
}

#[tokio::test]
async fn submitter_message_is_passed_through() {
    let mut form = filled_form("1", 1);
    let mut mock_submitter = MockSubmitter::new();
    mock_submitter
        .expect_send_batch()
        .times(1)
        .returning(|_, _| Err(BatchError::Submission("User rejected the request.".to_string())));
    mock_submitter.expect_wait_for_confirmation().times(0);

    let result = submit_form(&mut form, &decimals(18), &mock_submitter).await;

    assert!(result.is_err());
    assert_eq!(
        form.submission(),
        &SubmissionState::Failed("User rejected the request.".to_string())
    );
    assert_eq!(form.slots(), &[addr(1)]);
    assert_eq!(form.amount(), "1");
}

#[tokio::test]
async fn failed_confirmation_keeps_the_form() {
    let tx_hash = TxHash::with_last_byte(2);
    let mut form = filled_form("1", 1);
    let mut mock_submitter = MockSubmitter::new();
    mock_submitter
        .expect_send_batch()
        .times(1)
        .returning(move |_, _| Ok(tx_hash));
    mock_submitter
        .expect_wait_for_confirmation()
        .times(1)
        .returning(|tx_hash| Err(BatchError::Submission(format!("Transaction {tx_hash} was reverted"))));

    let result = submit_form(&mut form, &decimals(18), &mock_submitter).await;

    assert!(result.is_err());
    assert!(matches!(form.submission(), SubmissionState::Failed(message) if message.contains("reverted")));
    assert_eq!(form.slots(), &[addr(1)]);
}

#[tokio::test]
async fn in_flight_submission_is_not_doubled() {
    let mut form = filled_form("1", 1);
    form.begin_submission();

    let mut mock_submitter = MockSubmitter::new();
    mock_submitter.expect_send_batch().times(0);
    let mut mock_decimals = MockDecimals::new();
    mock_decimals.expect_decimals().times(0);

    assert_eq!(
        submit_form(&mut form, &mock_decimals, &mock_submitter).await,
        Err(BatchError::SubmissionInProgress)
    );
}

#[tokio::test]
async fn unconfirmed_transfer_blocks_sending_again() {
    let tx_hash = TxHash::with_last_byte(3);
    let mut form = filled_form("1", 2);
    let mut mock_submitter = MockSubmitter::new();
    mock_submitter
        .expect_send_batch()
        .times(1)
        .returning(move |_, _| Ok(tx_hash));
    mock_submitter
        .expect_wait_for_confirmation()
        .times(1)
        .returning(|tx_hash| Err(BatchError::Unconfirmed(tx_hash)));

    let result = submit_form(&mut form, &decimals(18), &mock_submitter).await;

    assert_eq!(result, Err(BatchError::Unconfirmed(tx_hash)));
    assert_eq!(form.submission(), &SubmissionState::Unconfirmed(tx_hash));
    assert_eq!(form.slots(), &[addr(1), addr(2)]);
    assert!(!form.is_submittable(Some(18)));

    // The first transfer may still be mined, a second submit must not send anything.
    assert_eq!(
        submit_form(&mut form, &decimals(18), &mock_submitter).await,
        Err(BatchError::Unconfirmed(tx_hash))
    );
}

#[tokio::test]
async fn dismissed_unconfirmed_transfer_can_be_sent_again() -> eyre::Result<()> {
    let tx_hash = TxHash::with_last_byte(4);
    let mut form = filled_form("1", 1);
    form.submission_unconfirmed(TxHash::with_last_byte(3));
    form.dismiss_unconfirmed();

    let mut mock_submitter = MockSubmitter::new();
    mock_submitter
        .expect_send_batch()
        .times(1)
        .returning(move |_, _| Ok(tx_hash));
    mock_submitter
        .expect_wait_for_confirmation()
        .times(1)
        .returning(|_| Ok(()));

    assert_eq!(submit_form(&mut form, &decimals(18), &mock_submitter).await?, tx_hash);
    Ok(())
}
