use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::issuance::collateral::CollateralDecisionEngine;
use crate::workflows::issuance::domain::{
    Applicant, BankParties, Beneficiary, Collateral, CreditProfile, CreditTerms,
    DocumentPresentation, FixedDepositCollateral, GoodsDetails, LcApplication, LcReference,
    LcType, PresentedDocument, ShipmentTerms,
};
use crate::workflows::issuance::fees::FeeConfig;
use crate::workflows::issuance::repository::InMemoryLcRepository;
use crate::workflows::issuance::service::LcIssuanceService;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")
}

pub(super) fn application() -> LcApplication {
    LcApplication {
        reference: LcReference("LC-2026-0042".to_string()),
        applicant: Applicant {
            name: "Meridian Textiles Pvt Ltd".to_string(),
            address: "Plot 14, MIDC Industrial Area".to_string(),
            city: "Mumbai".to_string(),
            country: "India".to_string(),
            account: "0012-445566-001".to_string(),
            tax_id: "AABCM1234F".to_string(),
        },
        beneficiary: Beneficiary {
            name: "Hanseatic Fabrics GmbH".to_string(),
            address: "Speicherstadt Block D".to_string(),
            city: "Hamburg".to_string(),
            country: "Germany".to_string(),
            bank_name: "Commerzbank AG".to_string(),
            swift_bic: "COBADEFFXXX".to_string(),
            iban: "DE89370400440532013000".to_string(),
        },
        banks: BankParties {
            issuing_bank: "Barclays Bank PLC, Mumbai Branch".to_string(),
            advising_bank: "Commerzbank AG, Hamburg".to_string(),
            confirming_bank: String::new(),
            negotiating_bank: "Any bank in Germany".to_string(),
        },
        terms: CreditTerms {
            currency: "USD".to_string(),
            amount: 100_000.0,
            tolerance_pct: 5.0,
            expiry_date: "2026-12-31".to_string(),
            expiry_place: "Hamburg".to_string(),
        },
        shipment: ShipmentTerms {
            latest_shipment_date: "2026-11-30".to_string(),
            incoterms: "CIF".to_string(),
            port_of_loading: "Nhava Sheva".to_string(),
            port_of_discharge: "Hamburg".to_string(),
            partial_shipment_allowed: false,
            transshipment_allowed: true,
        },
        goods: GoodsDetails {
            description: "100 percent combed cotton knitted fabric, 180 GSM".to_string(),
            quantity: "25000 metres".to_string(),
            unit_price: 4.0,
            hs_code: "6006.21".to_string(),
            country_of_origin: "India".to_string(),
        },
        lc_type: LcType::Sight,
        payment_terms: "At Sight".to_string(),
        documents_required: vec![
            "Commercial Invoice in triplicate".to_string(),
            "Full set of clean on board Bill of Lading".to_string(),
            "Packing List".to_string(),
            "Certificate of Origin issued by Chamber of Commerce".to_string(),
            "Insurance Certificate for 110 percent of invoice value".to_string(),
        ],
        additional_documents: String::new(),
        special_instructions: String::new(),
        collateral: Collateral {
            kind_tag: "FD".to_string(),
            fixed_deposit: Some(FixedDepositCollateral {
                number: "FD-88-112233".to_string(),
                bank: "Barclays Bank PLC".to_string(),
                amount: 150_000.0,
                currency: "USD".to_string(),
                maturity_date: "2027-06-30".to_string(),
                under_lien: true,
            }),
            securities: None,
            cash_margin: None,
            declared_value: 150_000.0,
        },
        credit: CreditProfile {
            annual_turnover: 4_800_000.0,
            years_in_business: 12,
            bureau_score: 742,
            existing_limit: 500_000.0,
            composite_rating: 78,
        },
        compliance: Default::default(),
    }
}

pub(super) fn presentation() -> DocumentPresentation {
    let mut documents = BTreeMap::new();
    for kind in PresentedDocument::all() {
        documents.insert(kind, "Yes".to_string());
    }
    DocumentPresentation {
        reference: LcReference("LC-2026-0042".to_string()),
        invoice_amount: 100_000.0,
        invoice_currency: "USD".to_string(),
        invoice_date: "2026-11-10".to_string(),
        bl_number: "MAEU-77120045".to_string(),
        bl_date: "2026-11-12".to_string(),
        vessel: "MV Elbe Trader".to_string(),
        shipment_date: "2026-11-12".to_string(),
        port_of_loading: "Nhava Sheva".to_string(),
        port_of_discharge: "Hamburg".to_string(),
        documents,
        additional_documents: String::new(),
        submitted_on: "2026-11-20".to_string(),
        status: Default::default(),
    }
}

pub(super) fn build_service() -> (
    LcIssuanceService<InMemoryLcRepository>,
    Arc<InMemoryLcRepository>,
) {
    let repository = Arc::new(InMemoryLcRepository::new());
    let service = LcIssuanceService::new(
        repository.clone(),
        FeeConfig::default(),
        CollateralDecisionEngine::default(),
    );
    (service, repository)
}
