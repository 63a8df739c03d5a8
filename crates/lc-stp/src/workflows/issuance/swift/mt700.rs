use chrono::NaiveDate;

use super::super::dates;
use super::super::domain::{LcApplication, LcType};
use super::super::draft;
use super::format::{allowed, party_block, render_tag, swift_amount, wrap};

/// The fixed tag sequence of an MT700 body. Order and count are part of the
/// wire contract; every tag is always emitted, with placeholder values where
/// the application is silent.
pub const TAG_ORDER: [&str; 28] = [
    "27", "40A", "20", "31C", "40E", "31D", "50", "59", "32B", "39A", "41A", "42C", "42A", "43P",
    "43T", "44E", "44F", "44C", "44B", "45A", "46A", "47A", "71B", "48", "49", "53A", "78", "72",
];

fn form_of_credit(lc_type: LcType) -> &'static str {
    match lc_type {
        LcType::Standby => "IRREVOCABLE STANDBY",
        LcType::Revolving => "IRREVOCABLE REVOLVING",
        _ => "IRREVOCABLE",
    }
}

fn availability(lc_type: LcType) -> &'static str {
    match lc_type {
        LcType::Sight | LcType::Standby => "BY PAYMENT",
        LcType::Usance => "BY ACCEPTANCE",
        LcType::Revolving | LcType::Unspecified => "BY NEGOTIATION",
    }
}

fn upper_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_ascii_uppercase()
    }
}

/// Render the MT700 body for an application. Deterministic: the same
/// application and issue date always produce byte-identical output.
pub fn generate(application: &LcApplication, issue_date: NaiveDate) -> String {
    let terms = &application.terms;
    let shipment = &application.shipment;
    let currency = upper_or(&terms.currency, "XXX");

    let expiry = format!(
        "{}{}",
        dates::swift_date(&terms.expiry_date),
        terms
            .expiry_place
            .trim()
            .to_ascii_uppercase()
            .chars()
            .take(29)
            .collect::<String>()
    );

    let applicant = party_block(
        &application.applicant.account,
        &application.applicant.name,
        &application.applicant.address,
        &application.applicant.city,
        &application.applicant.country,
    );
    let beneficiary = party_block(
        &application.beneficiary.iban,
        &application.beneficiary.name,
        &application.beneficiary.address,
        &application.beneficiary.city,
        &application.beneficiary.country,
    );

    let tolerance = terms.tolerance_pct.max(0.0).round() as u32;
    let advising = upper_or(&application.banks.advising_bank, "ANY BANK");

    let final_destination = {
        let city = application.applicant.city.trim();
        let country = application.applicant.country.trim();
        if city.is_empty() && country.is_empty() {
            upper_or(&shipment.port_of_discharge, "NOT SPECIFIED")
        } else if country.is_empty() {
            city.to_ascii_uppercase()
        } else if city.is_empty() {
            country.to_ascii_uppercase()
        } else {
            format!("{}/{}", city.to_ascii_uppercase(), country.to_ascii_uppercase())
        }
    };

    let mut goods = vec![wrap(&upper_or(&application.goods.description, "AS PER PROFORMA INVOICE"))];
    if !application.goods.quantity.trim().is_empty() {
        goods.push(format!(
            "QUANTITY: {}",
            application.goods.quantity.trim().to_ascii_uppercase()
        ));
    }
    if application.goods.unit_price > 0.0 {
        goods.push(format!(
            "UNIT PRICE: {} {}",
            currency,
            swift_amount(application.goods.unit_price)
        ));
    }
    if !shipment.incoterms.trim().is_empty() {
        goods.push(format!(
            "TRADE TERMS: {}",
            shipment.incoterms.trim().to_ascii_uppercase()
        ));
    }
    if !application.goods.hs_code.trim().is_empty() {
        goods.push(format!("HS CODE: {}", application.goods.hs_code.trim()));
    }
    if !application.goods.country_of_origin.trim().is_empty() {
        goods.push(format!(
            "COUNTRY OF ORIGIN: {}",
            application.goods.country_of_origin.trim().to_ascii_uppercase()
        ));
    }

    let documents = if application.documents_required.is_empty() {
        "+    1. AS PER UNDERLYING CONTRACT".to_string()
    } else {
        application
            .documents_required
            .iter()
            .enumerate()
            .map(|(index, name)| {
                format!("+    {}. {}", index + 1, name.trim().to_ascii_uppercase())
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let additional_conditions = if application.special_instructions.trim().is_empty() {
        "NONE".to_string()
    } else {
        wrap(&application.special_instructions.trim().to_ascii_uppercase())
    };

    let confirmation = if application.banks.has_confirming_bank() {
        "CONFIRM"
    } else {
        "WITHOUT"
    };

    let values: [String; 28] = [
        "1/1".to_string(),
        form_of_credit(application.lc_type).to_string(),
        draft::lc_number(application.reference.as_str(), issue_date),
        issue_date.format("%Y%m%d").to_string(),
        "UCP LATEST VERSION".to_string(),
        expiry,
        applicant,
        beneficiary,
        format!("{}{}", currency, swift_amount(terms.amount)),
        format!("{tolerance:02}/{tolerance:02}"),
        format!("WITH {advising}\n{}", availability(application.lc_type)),
        upper_or(&application.payment_terms, "SIGHT"),
        upper_or(&application.banks.issuing_bank, "NOT SPECIFIED"),
        allowed(shipment.partial_shipment_allowed).to_string(),
        allowed(shipment.transshipment_allowed).to_string(),
        upper_or(&shipment.port_of_loading, "ANY PORT"),
        upper_or(&shipment.port_of_discharge, "ANY PORT"),
        dates::swift_date(&shipment.latest_shipment_date),
        final_destination,
        goods.join("\n"),
        documents,
        additional_conditions,
        wrap("ALL BANKING CHARGES OUTSIDE INDIA ARE FOR THE ACCOUNT OF THE BENEFICIARY"),
        "21 DAYS AFTER DATE OF SHIPMENT".to_string(),
        confirmation.to_string(),
        upper_or(&application.banks.issuing_bank, "NOT SPECIFIED"),
        wrap("UPON RECEIPT OF CREDIT COMPLIANT DOCUMENTS WE UNDERTAKE TO REMIT PROCEEDS IN ACCORDANCE WITH THE PRESENTING BANK'S INSTRUCTIONS"),
        wrap("THIS CREDIT IS SUBJECT TO UCP 600 (2007 REVISION) ICC PUBLICATION NO. 600. PLEASE ACKNOWLEDGE RECEIPT"),
    ];

    TAG_ORDER
        .iter()
        .zip(values.iter())
        .map(|(tag, value)| render_tag(tag, value))
        .collect::<Vec<_>>()
        .join("\n")
}
