use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use tempfile::tempdir;
use test_case::test_case;

use super::*;
use crate::account::Account;

/// Test fixture for on-disk store tests
fn setup_test_store() -> (tempfile::TempDir, JsonFileStore) {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("data").join("accounts.json"));
    (dir, store)
}

fn sample_bank() -> Bank {
    Bank::new(vec![
        Account::new("555001", "0001", dec!(10.50), dec!(0.01), dec!(-20), dec!(100)),
        Account::new("555002", "0002", dec!(0), dec!(0), dec!(300.75), dec!(0)),
        Account::new("555003", "0003", dec!(7), dec!(0.02), dec!(0), dec!(50)),
    ])
}

#[test]
fn test_save_and_load_preserves_order_and_values() {
    let (_dir, store) = setup_test_store();
    let bank = sample_bank();

    save_bank(&store, &bank).unwrap();
    assert!(store.exists());

    let loaded = load_bank(&store);
    assert_eq!(loaded, bank);
    assert_eq!(loaded.accounts()[2].account_number(), "555003");
}

#[test]
fn test_document_is_versioned_and_inspectable() {
    let (_dir, store) = setup_test_store();
    save_bank(&store, &sample_bank()).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    let document: serde_json::Value = serde_json::from_str(&contents).unwrap();

    assert_eq!(document["version"], STORE_FORMAT_VERSION);
    assert_eq!(document["accounts"][0]["account_number"], "555001");
    assert_eq!(document["accounts"][0]["checking_balance"], "-20");
    assert_eq!(document["accounts"][1]["checking_balance"], "300.75");
    assert!(document["saved_at"].is_string());
}

#[test]
fn test_missing_store_falls_back_to_defaults() {
    let (_dir, store) = setup_test_store();

    assert!(matches!(store.load(), Err(StoreError::NotFound(_))));
    assert_eq!(load_bank(&store), Bank::with_default_accounts());
}

#[test]
fn test_corrupt_store_falls_back_to_defaults() {
    let (_dir, store) = setup_test_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), b"\xac\xed\x00\x05sr\x00\x13java.util.ArrayList").unwrap();

    assert!(store.load().is_err());
    assert_eq!(load_bank(&store), Bank::with_default_accounts());
}

#[test]
fn test_tampered_store_is_rejected() {
    let (_dir, store) = setup_test_store();
    save_bank(&store, &sample_bank()).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    fs::write(store.path(), contents.replace("\"300.75\"", "\"999999\"")).unwrap();

    assert!(matches!(store.load(), Err(StoreError::ChecksumMismatch)));
    assert_eq!(load_bank(&store), Bank::with_default_accounts());
}

#[test]
fn test_checksum_verification_can_be_disabled() {
    let (_dir, store) = setup_test_store();
    save_bank(&store, &sample_bank()).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    fs::write(store.path(), contents.replace("\"300.75\"", "\"301\"")).unwrap();

    let records = store.clone().verify_checksum(false).load().unwrap();
    assert_eq!(records[1].checking_balance, dec!(301));
}

#[test]
fn test_unsupported_version_is_rejected() {
    let (_dir, store) = setup_test_store();
    save_bank(&store, &sample_bank()).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    let mut document: serde_json::Value = serde_json::from_str(&contents).unwrap();
    document["version"] = serde_json::json!(99);
    fs::write(store.path(), document.to_string()).unwrap();

    assert!(matches!(
        store.load(),
        Err(StoreError::UnsupportedVersion { found: 99, expected: 1 })
    ));
}

#[test]
fn test_empty_store_falls_back_to_defaults() {
    let mut store = MockAccountStore::new();
    store.expect_load().times(1).returning(|| Ok(Vec::new()));

    assert_eq!(load_bank(&store), Bank::with_default_accounts());
}

#[test]
fn test_unreadable_store_falls_back_to_defaults() {
    let mut store = MockAccountStore::new();
    store.expect_load().times(1).returning(|| {
        Err(StoreError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")))
    });

    assert_eq!(load_bank(&store), Bank::with_default_accounts());
}

fn record(savings_balance: Decimal, savings_rate: Decimal, checking_balance: Decimal, overdraft_limit: Decimal) -> AccountRecord {
    AccountRecord {
        account_number: "555009".to_string(),
        pin: "0009".to_string(),
        savings_balance,
        savings_rate,
        checking_balance,
        overdraft_limit,
    }
}

#[test_case(dec!(-0.01), dec!(0), dec!(0), dec!(0), "negative savings balance" ; "savings below zero")]
#[test_case(dec!(0), dec!(-0.05), dec!(0), dec!(0), "negative interest rate" ; "negative rate")]
#[test_case(dec!(0), dec!(0), dec!(0), dec!(-1), "negative overdraft limit" ; "negative limit")]
#[test_case(dec!(0), dec!(0), dec!(-100.01), dec!(100), "checking balance exceeds overdraft limit" ; "past the limit")]
fn test_invalid_record_is_rejected(
    savings_balance: Decimal,
    savings_rate: Decimal,
    checking_balance: Decimal,
    overdraft_limit: Decimal,
    reason: &str,
) {
    let records = vec![record(savings_balance, savings_rate, checking_balance, overdraft_limit)];

    let err = validate_records(&records).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Invalid record for account 555009: {}", reason)
    );
}

#[test]
fn test_record_at_overdraft_limit_is_valid() {
    let records = vec![record(dec!(0), dec!(0), dec!(-100), dec!(100))];
    assert!(validate_records(&records).is_ok());
}

#[test]
fn test_invalid_record_on_disk_falls_back_to_defaults() {
    let (_dir, store) = setup_test_store();
    let mut records = sample_bank().to_records();
    records[1].checking_balance = dec!(-5000);
    store.save(&records).unwrap();

    // the checksum still matches, only the balances are inconsistent
    assert_eq!(store.load().unwrap(), records);
    assert!(matches!(
        validate_records(&records),
        Err(StoreError::InvalidRecord { ref account_number, .. }) if account_number == "555002"
    ));
    assert_eq!(load_bank(&store), Bank::with_default_accounts());
}

#[test]
fn test_invalid_record_from_any_store_falls_back_to_defaults() {
    let mut store = MockAccountStore::new();
    store
        .expect_load()
        .times(1)
        .returning(|| Ok(vec![record(dec!(-10), dec!(0.01), dec!(0), dec!(0))]));

    assert_eq!(load_bank(&store), Bank::with_default_accounts());
}

#[test]
fn test_save_hands_over_current_records() {
    let mut bank = Bank::with_default_accounts();
    bank.authenticate_mut("123456", "1234")
        .unwrap()
        .checking_mut()
        .withdraw(dec!(1500))
        .unwrap();

    let mut store = MockAccountStore::new();
    store
        .expect_save()
        .withf(|records: &[AccountRecord]| {
            records.len() == 2
                && records[0].account_number == "123456"
                && records[0].checking_balance == dec!(500)
                && records[1].account_number == "789012"
        })
        .times(1)
        .returning(|_| Ok(()));

    save_bank(&store, &bank).unwrap();
}

#[test]
fn test_save_failure_is_reported() {
    let mut store = MockAccountStore::new();
    store.expect_save().times(1).returning(|_| {
        Err(StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk full")))
    });

    let err = save_bank(&store, &Bank::with_default_accounts()).unwrap_err();
    assert_eq!(err.to_string(), "Store I/O error: disk full");
}
