use super::common::application;
use crate::workflows::issuance::domain::{
    parse_decimal, CollateralType, LcType, PresentedDocument,
};

#[test]
fn lc_type_normalises_free_text_at_the_boundary() {
    assert_eq!(LcType::from_tag("  Sight "), LcType::Sight);
    assert_eq!(LcType::from_tag("USANCE"), LcType::Usance);
    assert_eq!(LcType::from_tag("standby"), LcType::Standby);
    assert_eq!(LcType::from_tag("revolving"), LcType::Revolving);
    assert_eq!(LcType::from_tag("back-to-back"), LcType::Unspecified);
}

#[test]
fn collateral_type_tags_parse_and_unknowns_stay_unparsed() {
    assert_eq!(CollateralType::from_tag("fd"), Some(CollateralType::FixedDeposit));
    assert_eq!(
        CollateralType::from_tag(" govt_bond "),
        Some(CollateralType::GovtBond)
    );
    assert_eq!(CollateralType::from_tag("CRYPTO"), None);
}

#[test]
fn effective_value_prefers_the_type_specific_amount() {
    let mut collateral = application().collateral;
    collateral.fixed_deposit.as_mut().expect("fd").amount = 120_000.0;
    collateral.declared_value = 90_000.0;
    assert_eq!(collateral.effective_value(), 120_000.0);

    // A zeroed type-specific amount falls back to the declared value.
    collateral.fixed_deposit.as_mut().expect("fd").amount = 0.0;
    assert_eq!(collateral.effective_value(), 90_000.0);

    // Cash margin drives the CASH type.
    collateral.kind_tag = "CASH".to_string();
    collateral.cash_margin = Some(75_000.0);
    assert_eq!(collateral.effective_value(), 75_000.0);
}

#[test]
fn decimal_parsing_is_defensive() {
    assert_eq!(parse_decimal("1,25,000.50"), 125_000.50);
    assert_eq!(parse_decimal("  42 "), 42.0);
    assert_eq!(parse_decimal("plenty"), 0.0);
    assert_eq!(parse_decimal(""), 0.0);
}

#[test]
fn document_match_keys_use_the_first_slash_segment() {
    assert_eq!(PresentedDocument::WeightCertificate.match_key(), "weight");
    assert_eq!(
        PresentedDocument::CommercialInvoice.match_key(),
        "commercial invoice"
    );
}
