//! Tests for request composition

use super::*;
use crate::types::{BillTo, CreditCard, Invoice, RecurringInfo};
use std::str::FromStr;

fn test_user() -> UserInfo {
    UserInfo::new("user", "vendor", "PayPal", "pwd")
}

#[test]
fn test_sale_composes_byte_identical_wire_message() {
    let card = CreditCard::new("5105105105105100", "0126").with_cvv2("123");
    let invoice = Invoice::new()
        .with_amt(rust_decimal::Decimal::from_str("25.12").unwrap())
        .with_po_num("PO12345");

    let transaction = Transaction::new(test_user(), trxtypes::SALE)
        .with_request_id("req-1")
        .with_tender(Tender::Card(card))
        .with_invoice(invoice);

    let wire = transaction.compose().unwrap();
    assert_eq!(
        wire,
        "USER[4]=user&VENDOR[6]=vendor&PARTNER[6]=PayPal&PWD[3]=pwd\
         &REQUEST_ID[5]=req-1&TRXTYPE[1]=S\
         &TENDER[1]=C&ACCT[16]=5105105105105100&EXPDATE[4]=0126&CVV2[3]=123\
         &AMT[5]=25.12&PONUM[7]=PO12345"
    );

    // Identical input must always produce identical bytes.
    let again = Transaction::new(test_user(), trxtypes::SALE)
        .with_request_id("req-1")
        .with_tender(Tender::Card(
            CreditCard::new("5105105105105100", "0126").with_cvv2("123"),
        ))
        .with_invoice(
            Invoice::new()
                .with_amt(rust_decimal::Decimal::from_str("25.12").unwrap())
                .with_po_num("PO12345"),
        );
    assert_eq!(again.compose().unwrap(), wire);
}

#[test]
fn test_omitted_tender_contributes_no_instrument_keys() {
    let transaction = Transaction::new(test_user(), trxtypes::RECURRING)
        .with_request_id("req-2")
        .with_recurring(
            RecurringInfo::new()
                .with_orig_profile_id("RP0000001234")
                .with_profile_name("Monthly premium"),
        );

    let wire = transaction.compose().unwrap();
    assert!(!wire.contains("TENDER"));
    assert!(!wire.contains("ACCT"));
    assert!(!wire.contains("EXPDATE"));
    assert!(wire.contains("ORIGPROFILEID[12]=RP0000001234"));
    assert!(wire.contains("TRXTYPE[1]=R"));
}

#[test]
fn test_contributor_order_is_protocol_mandated() {
    let transaction = Transaction::new(test_user(), trxtypes::SALE)
        .with_request_id("req-3")
        .with_verbosity("HIGH")
        .with_tender(Tender::Card(CreditCard::new("4111111111111111", "0126")))
        .with_invoice(
            Invoice::new().with_bill_to(BillTo::new().with_last_name("Smith")),
        )
        .with_recurring(RecurringInfo::new().with_profile_name("p"));

    let wire = transaction.compose().unwrap();
    let order = [
        wire.find("USER[").unwrap(),
        wire.find("REQUEST_ID[").unwrap(),
        wire.find("TRXTYPE[").unwrap(),
        wire.find("VERBOSITY[").unwrap(),
        wire.find("TENDER[").unwrap(),
        wire.find("BILLTOLASTNAME[").unwrap(),
        wire.find("PROFILENAME[").unwrap(),
    ];
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_free_text_values_round_trip_through_composition() {
    let invoice = Invoice::new().with_bill_to(
        BillTo::new().with_street("332 Briles Ct. & Annex [rear] = unit 4"),
    );
    let transaction = Transaction::new(test_user(), trxtypes::SALE)
        .with_request_id("req-4")
        .with_invoice(invoice);

    let wire = transaction.compose().unwrap();
    let decoded = crate::codec::decode_message(&wire).unwrap();
    assert_eq!(
        decoded.get(params::BILLTOSTREET),
        Some("332 Briles Ct. & Annex [rear] = unit 4")
    );
}

#[test]
fn test_unknown_trxtype_is_a_config_error() {
    let transaction = Transaction::new(test_user(), "Z");
    let err = transaction.compose().unwrap_err();
    assert_eq!(err.kind(), "Config");
}

#[test]
fn test_blank_credentials_fail_validation() {
    let transaction = Transaction::new(UserInfo::new("", "", "", ""), trxtypes::SALE);
    assert!(transaction.compose().is_err());
}

#[test]
fn test_generated_request_ids_are_unique() {
    let a = Transaction::new(test_user(), trxtypes::SALE);
    let b = Transaction::new(test_user(), trxtypes::SALE);
    assert_ne!(a.request_id, b.request_id);
    assert!(!a.request_id.is_empty());
}
