mod utils;

use alloy::primitives::U256;
use alloy::sol_types::SolCall;
use client::{ConfigBuilder, ConfigBuilderError, RegistrationSession, SessionError};
use keysplit::EncryptError;
use registration::{
    BuildError, NetworkReader, OperatorRegistration, ProtocolVersion, SSVNetwork,
};
use ssv_types::test_utils::generators;
use ssv_types::{Password, Slot};
use submitter::{ProviderError, SendEvent, SubmissionError, TransactionState};
use utils::*;

const KEY: &str = "0x3d4d5e9a4e0a0a0d6c2b73b66d0e9a9c1a4b9f0c2e7d8b5a6c4e3f2a1b0c9d5c";

#[tokio::test]
async fn full_registration_flow() {
    let mut fixture = TestFixture::new(6);
    let session = &mut fixture.session;

    let validator = session.load_raw_key(KEY).unwrap();
    assert_eq!(session.validator_public_key(), Some(validator));
    assert_eq!(session.load_operators(&fixture.directory, false).await.unwrap(), 6);
    assert_eq!(session.auto_select(), 4);
    assert!(session.quorum().is_quorum_met());
    assert_eq!(session.quorum().selection_stats().total, 6);

    let payload = session.build_payload().unwrap();
    assert_eq!(payload.validator_public_key, validator);
    let expected: Vec<_> = fixture.directory.0[..4]
        .iter()
        .map(|op| op.public_key.clone())
        .collect();
    assert_eq!(payload.operator_public_keys, expected);

    let estimate = session.estimate_registration().await.unwrap();
    assert_eq!(estimate.gas_units, 1_500_000);
    assert_eq!(estimate.fiat_cost, 0.0);

    fixture.wallet.script(vec![
        SendEvent::TransactionHash(HASH),
        SendEvent::Receipt(receipt()),
    ]);
    let mut hashes = Vec::new();
    let confirmed = session
        .register_validator(|hash| hashes.push(hash))
        .await
        .unwrap();
    assert_eq!(confirmed, receipt());
    assert_eq!(hashes, vec![HASH]);

    // The estimate and the submission used the same payload
    let sent = fixture.wallet.sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, CONTRACT);
    assert_eq!(sent[0].input, payload.calldata());
    drop(sent);

    // Confirmation cleans up the secret
    assert!(!session.has_secret());
    assert_eq!(session.build_payload().unwrap_err(), SessionError::NoSecret);
    assert!(matches!(
        session.transaction_state(),
        TransactionState::Confirmed(_)
    ));
}

#[tokio::test]
async fn unmet_quorum_is_actionable() {
    let mut fixture = TestFixture::new(2);
    let session = &mut fixture.session;
    session.load_raw_key(KEY).unwrap();
    session.load_operators(&fixture.directory, false).await.unwrap();

    assert_eq!(session.auto_select(), 2);
    let err = session.build_payload().unwrap_err();
    assert_eq!(
        err,
        SessionError::Build(BuildError::QuorumNotMet {
            selected: 2,
            required: 4
        })
    );
    assert_eq!(
        err.user_message(),
        "Please select at least 4 operators (2 selected)"
    );
    // Nothing was consumed
    assert!(session.has_secret());
}

#[tokio::test]
async fn failed_submission_can_be_retried() {
    let mut fixture = TestFixture::new(4);
    let session = &mut fixture.session;
    session.load_raw_key(KEY).unwrap();
    session.load_operators(&fixture.directory, false).await.unwrap();
    session.auto_select();

    fixture
        .wallet
        .script(vec![SendEvent::Error(ProviderError::Rejected)]);
    let err = session.register_validator(|_| {}).await.unwrap_err();
    assert_eq!(
        err,
        SessionError::Submission(SubmissionError::Provider(ProviderError::Rejected))
    );
    assert_eq!(err.user_message(), "The transaction was rejected");
    assert!(session.has_secret());

    fixture.wallet.script(vec![
        SendEvent::TransactionHash(HASH),
        SendEvent::Receipt(receipt()),
    ]);
    session.register_validator(|_| {}).await.unwrap();

    // Both attempts carried the same memoized payload
    let sent = fixture.wallet.sent.lock();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], sent[1]);
}

#[tokio::test]
async fn manual_selection_uses_directory() {
    let mut fixture = TestFixture::new(4);
    let session = &mut fixture.session;
    session.load_operators(&fixture.directory, false).await.unwrap();
    let first = fixture.directory.0[0].public_key.clone();
    let slot = |i| Slot::new(i).unwrap();

    assert!(session.select(&first, slot(1)).unwrap());
    assert!(!session.select(&first, slot(2)).unwrap());
    assert_eq!(
        session.select(&generators::operator::with_fee(9, Default::default()).public_key, slot(2)),
        Err(SessionError::UnknownOperator(
            generators::operator::with_fee(9, Default::default()).public_key
        ))
    );
    assert_eq!(session.unselect_by_public_key(&first), 1);
    assert_eq!(session.quorum().selected_count(), 0);
}

#[test]
fn keystore_intake_replaces_secret() {
    let mut fixture = TestFixture::new(0);
    let session = &mut fixture.session;

    let wrong = session
        .load_keystore(&PlainKeystore, KEY.as_bytes(), &Password::new("wrong".to_string()))
        .unwrap_err();
    assert_eq!(wrong.user_message(), "Invalid keystore password");
    assert!(!session.has_secret());

    let first = session
        .load_keystore(&PlainKeystore, KEY.as_bytes(), &Password::new("hunter2\n".to_string()))
        .unwrap();
    let second = session
        .load_raw_key("0x25295f0d1d592a90b333e26e85149708208e9f8e8bc18f6c77bd62f8ad7a6866")
        .unwrap();
    assert_ne!(first, second);
    assert_eq!(session.validator_public_key(), Some(second));

    // A zero key is not a usable validator key
    let err = session.load_raw_key(&"00".repeat(32)).unwrap_err();
    assert!(matches!(err, SessionError::InvalidKey(_)));
    assert_eq!(session.validator_public_key(), Some(second));
}

#[tokio::test]
async fn cancel_clears_flow() {
    let mut fixture = TestFixture::new(4);
    let session = &mut fixture.session;
    session.load_raw_key(KEY).unwrap();
    session.load_operators(&fixture.directory, false).await.unwrap();
    session.auto_select();
    session.build_payload().unwrap();

    session.cancel();
    assert!(!session.has_secret());
    assert_eq!(session.quorum().selected_count(), 0);
    assert_eq!(session.transaction_state(), TransactionState::Idle);
}

#[tokio::test]
async fn legacy_protocol_registers_with_owner() {
    let config = ConfigBuilder::new()
        .with_protocol(ProtocolVersion::Legacy)
        .with_contract_address(CONTRACT)
        .build()
        .unwrap();
    let mut fixture = TestFixture::with_config(4, config);
    let session = &mut fixture.session;
    session.load_raw_key(KEY).unwrap();
    session.load_operators(&fixture.directory, false).await.unwrap();
    session.auto_select();

    fixture.wallet.script(vec![SendEvent::Receipt(receipt())]);
    session.register_validator(|_| {}).await.unwrap();

    let sent = fixture.wallet.sent.lock();
    assert_eq!(sent[0].method, "addValidator");
    let decoded = SSVNetwork::addValidatorCall::abi_decode(&sent[0].input, true).unwrap();
    assert_eq!(decoded.ownerAddress, ACCOUNT);
}

#[tokio::test]
async fn failed_build_requires_the_key_again() {
    let mut fixture = TestFixture::new(0);
    let session = &mut fixture.session;
    session.load_raw_key(KEY).unwrap();
    // Operators whose keys are not RSA keys can not be encrypted to
    for id in 1..=4 {
        let operator = generators::operator::with_fee(id, U256::ZERO);
        assert!(session.select_operator(operator, Slot::new(id as usize).unwrap()));
    }

    let err = session.build_payload().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Build(BuildError::Encrypt(EncryptError::InvalidRecipientKey(_)))
    ));
    assert!(!session.has_secret());
    assert_eq!(session.validator_public_key(), None);

    let err = session.build_payload().unwrap_err();
    assert_eq!(err, SessionError::NoSecret);
    assert_eq!(err.user_message(), "Please provide your validator key first");
}

#[tokio::test]
async fn fee_refresh_keeps_auto_selection() {
    let mut fixture = TestFixture::ready(4, KEY).await;
    let session = &mut fixture.session;
    let reader = NetworkReader::new(FlatFeeContract(U256::from(777)), CONTRACT);

    session.refresh_selected_fees(&reader).await.unwrap();
    assert_eq!(session.quorum().selected_count(), 4);
    for selected in session.quorum().selected() {
        assert_eq!(selected.operator.fee, U256::from(777));
        assert!(selected.auto_selected);
        assert_eq!(
            session
                .directory()
                .get(&selected.operator.public_key)
                .map(|op| op.fee),
            Some(U256::from(777))
        );
    }
}

#[tokio::test]
async fn confirmed_transaction_needs_reset() {
    let mut fixture = TestFixture::ready(4, KEY).await;
    let session = &mut fixture.session;
    fixture.wallet.script(vec![SendEvent::Receipt(receipt())]);
    session.register_validator(|_| {}).await.unwrap();

    let registration = OperatorRegistration::new(
        "operator",
        fixture.directory.0[0].public_key.clone(),
    );
    let err = session
        .register_operator(&registration, |_| {})
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        "The transaction is already confirmed, reset it to start another"
    );

    session.reset_transaction();
    fixture.wallet.script(vec![SendEvent::Receipt(receipt())]);
    session.register_operator(&registration, |_| {}).await.unwrap();
}

#[test]
fn invalid_config_is_rejected_at_session_start() {
    let builder = ConfigBuilder::new().with_slots(2);
    let err = RegistrationSession::with_builder(builder, MockWallet::default(), OfflineOracle)
        .err()
        .unwrap();
    assert_eq!(
        err,
        SessionError::Config(ConfigBuilderError::SlotsBelowMinimum)
    );

    let builder = ConfigBuilder::new().with_slots(13);
    let session =
        RegistrationSession::with_builder(builder, MockWallet::default(), OfflineOracle).unwrap();
    assert_eq!(session.quorum().slot_count(), 13);
}
