use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for letter of credit applications. Assigned once at
/// intake and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct LcReference(pub String);

impl LcReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Buyer-side party requesting the credit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub account: String,
    pub tax_id: String,
}

/// Seller-side party in whose favour the credit is issued.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Beneficiary {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub bank_name: String,
    pub swift_bic: String,
    pub iban: String,
}

/// Bank chain around the credit. Names are free text as captured at intake.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BankParties {
    pub issuing_bank: String,
    pub advising_bank: String,
    pub confirming_bank: String,
    pub negotiating_bank: String,
}

impl BankParties {
    /// A blank confirming bank means the credit is issued without confirmation.
    pub fn confirmation_label(&self) -> &str {
        if self.confirming_bank.trim().is_empty() {
            "without confirmation"
        } else {
            self.confirming_bank.trim()
        }
    }

    pub fn has_confirming_bank(&self) -> bool {
        !self.confirming_bank.trim().is_empty()
    }
}

/// Monetary and validity terms of the credit. Dates stay free-form strings as
/// captured from intake forms; engines parse them defensively.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreditTerms {
    pub currency: String,
    pub amount: f64,
    pub tolerance_pct: f64,
    pub expiry_date: String,
    pub expiry_place: String,
}

/// Carriage terms of the underlying shipment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShipmentTerms {
    pub latest_shipment_date: String,
    pub incoterms: String,
    pub port_of_loading: String,
    pub port_of_discharge: String,
    pub partial_shipment_allowed: bool,
    pub transshipment_allowed: bool,
}

/// Description of the traded goods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GoodsDetails {
    pub description: String,
    pub quantity: String,
    pub unit_price: f64,
    pub hs_code: String,
    pub country_of_origin: String,
}

/// Closed set of credit types. Free-text intake values are normalised here and
/// nowhere deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LcType {
    Sight,
    Usance,
    Standby,
    Revolving,
    #[default]
    Unspecified,
}

impl LcType {
    pub fn from_tag(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sight" => LcType::Sight,
            "usance" => LcType::Usance,
            "standby" => LcType::Standby,
            "revolving" => LcType::Revolving,
            _ => LcType::Unspecified,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LcType::Sight => "Sight",
            LcType::Usance => "Usance",
            LcType::Standby => "Standby",
            LcType::Revolving => "Revolving",
            LcType::Unspecified => "Documentary",
        }
    }
}

/// Closed set of collateral classes recognised by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollateralType {
    FixedDeposit,
    Cash,
    GovtBond,
    LiquidSecurity,
    Receivables,
    Property,
    Machinery,
}

impl CollateralType {
    /// Parse an intake tag. Unknown tags stay unparsed so the decision engine
    /// can route them to manual review instead of guessing.
    pub fn from_tag(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FD" | "FIXED_DEPOSIT" => Some(CollateralType::FixedDeposit),
            "CASH" | "CASH_MARGIN" => Some(CollateralType::Cash),
            "GOVT_BOND" => Some(CollateralType::GovtBond),
            "LIQUID_SECURITY" => Some(CollateralType::LiquidSecurity),
            "RECEIVABLES" => Some(CollateralType::Receivables),
            "PROPERTY" => Some(CollateralType::Property),
            "MACHINERY" => Some(CollateralType::Machinery),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CollateralType::FixedDeposit => "FD",
            CollateralType::Cash => "CASH",
            CollateralType::GovtBond => "GOVT_BOND",
            CollateralType::LiquidSecurity => "LIQUID_SECURITY",
            CollateralType::Receivables => "RECEIVABLES",
            CollateralType::Property => "PROPERTY",
            CollateralType::Machinery => "MACHINERY",
        }
    }
}

/// Fixed deposit pledged against the credit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedDepositCollateral {
    pub number: String,
    pub bank: String,
    pub amount: f64,
    pub currency: String,
    pub maturity_date: String,
    pub under_lien: bool,
}

/// Marketable securities pledged against the credit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecuritiesCollateral {
    pub isin: String,
    pub issuer: String,
    pub market_value: f64,
    pub quantity: f64,
    pub custodian: String,
    pub volatility_class: String,
    pub pledged: bool,
}

/// Collateral offered with the application: a primary type tag plus
/// type-specific sub-records and a generic declared value fallback.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Collateral {
    pub kind_tag: String,
    pub fixed_deposit: Option<FixedDepositCollateral>,
    pub securities: Option<SecuritiesCollateral>,
    pub cash_margin: Option<f64>,
    pub declared_value: f64,
}

impl Collateral {
    /// The value fed into the decision engine: the type-specific amount when it
    /// is populated, the generic declared value otherwise.
    pub fn effective_value(&self) -> f64 {
        let type_specific = match CollateralType::from_tag(&self.kind_tag) {
            Some(CollateralType::FixedDeposit) => {
                self.fixed_deposit.as_ref().map(|fd| fd.amount)
            }
            Some(CollateralType::Cash) => self.cash_margin,
            Some(CollateralType::GovtBond) | Some(CollateralType::LiquidSecurity) => {
                self.securities.as_ref().map(|s| s.market_value)
            }
            _ => None,
        };
        match type_specific {
            Some(value) if value > 0.0 => value,
            _ => self.declared_value,
        }
    }
}

/// Bureau-style credit snapshot captured at intake.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreditProfile {
    pub annual_turnover: f64,
    pub years_in_business: u32,
    pub bureau_score: u16,
    pub existing_limit: f64,
    /// Composite rating derived by the scoring desk, 0-100.
    pub composite_rating: u8,
}

/// Status of an individual screening check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreeningStatus {
    #[default]
    Pending,
    Cleared,
    Failed,
}

impl ScreeningStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ScreeningStatus::Pending => "Pending",
            ScreeningStatus::Cleared => "Cleared",
            ScreeningStatus::Failed => "Failed",
        }
    }
}

/// Compliance screening state across the mandated checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplianceFlags {
    pub kyc: ScreeningStatus,
    pub sanctions_applicant: ScreeningStatus,
    pub sanctions_beneficiary: ScreeningStatus,
    pub country_risk: ScreeningStatus,
    pub aml: ScreeningStatus,
}

impl ComplianceFlags {
    pub fn all_cleared(&self) -> bool {
        [
            self.kyc,
            self.sanctions_applicant,
            self.sanctions_beneficiary,
            self.country_risk,
            self.aml,
        ]
        .iter()
        .all(|status| *status == ScreeningStatus::Cleared)
    }
}

/// Outcome of the collateral adequacy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StpDecision {
    #[default]
    Pending,
    Yes,
    No,
    Review,
}

impl StpDecision {
    pub const fn label(self) -> &'static str {
        match self {
            StpDecision::Pending => "PENDING",
            StpDecision::Yes => "YES",
            StpDecision::No => "NO",
            StpDecision::Review => "REVIEW",
        }
    }
}

/// Current straight-through processing state. Overwritten wholesale on every
/// decision run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StpState {
    pub decision: StpDecision,
    pub haircut_pct: Option<f64>,
    pub eligible_value: f64,
    pub reason: String,
    pub run_at: Option<DateTime<Utc>>,
    pub operator: Option<String>,
}

/// High level status tracked throughout the issuance workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleStatus {
    #[default]
    PendingReview,
    UnderReview,
    Approved,
    Rejected,
    MoreInfoRequired,
    SentToAdvisingBank,
    Closed,
}

impl LifecycleStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LifecycleStatus::PendingReview => "Pending Review",
            LifecycleStatus::UnderReview => "Under Review",
            LifecycleStatus::Approved => "Approved",
            LifecycleStatus::Rejected => "Rejected",
            LifecycleStatus::MoreInfoRequired => "More Info Required",
            LifecycleStatus::SentToAdvisingBank => "Sent to Advising Bank",
            LifecycleStatus::Closed => "Closed",
        }
    }
}

/// Cached generation artifacts. Derived state; regenerating overwrites.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedArtifacts {
    pub lc_number: Option<String>,
    pub draft_text: Option<String>,
    pub pdf_path: Option<String>,
    pub drafted_at: Option<DateTime<Utc>>,
    pub mt700_text: Option<String>,
    pub mt700_at: Option<DateTime<Utc>>,
}

/// The aggregate root: everything captured on one LC application.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LcApplication {
    pub reference: LcReference,
    pub applicant: Applicant,
    pub beneficiary: Beneficiary,
    pub banks: BankParties,
    pub terms: CreditTerms,
    pub shipment: ShipmentTerms,
    pub goods: GoodsDetails,
    pub lc_type: LcType,
    pub payment_terms: String,
    pub documents_required: Vec<String>,
    pub additional_documents: String,
    pub special_instructions: String,
    pub collateral: Collateral,
    pub credit: CreditProfile,
    pub compliance: ComplianceFlags,
}

/// Repository record: the submitted application plus the bank-side state that
/// accretes around it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LcApplicationRecord {
    pub application: LcApplication,
    pub status: LifecycleStatus,
    pub officer_notes: Vec<String>,
    pub stp: StpState,
    pub artifacts: GeneratedArtifacts,
}

/// Canonical document kinds the examiner knows how to check for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PresentedDocument {
    CommercialInvoice,
    BillOfLading,
    PackingList,
    CertificateOfOrigin,
    InsuranceCertificate,
    InspectionCertificate,
    WeightCertificate,
}

impl PresentedDocument {
    pub const fn label(self) -> &'static str {
        match self {
            PresentedDocument::CommercialInvoice => "Commercial Invoice",
            PresentedDocument::BillOfLading => "Bill of Lading",
            PresentedDocument::PackingList => "Packing List",
            PresentedDocument::CertificateOfOrigin => "Certificate of Origin",
            PresentedDocument::InsuranceCertificate => "Insurance Certificate",
            PresentedDocument::InspectionCertificate => "Inspection Certificate",
            PresentedDocument::WeightCertificate => "Weight/Measurement Certificate",
        }
    }

    /// The substring a required-document line must contain to map onto this
    /// kind: the first slash segment of the label, lowercased.
    pub fn match_key(self) -> String {
        let label = self.label();
        let head = label.split('/').next().unwrap_or(label);
        head.trim().to_ascii_lowercase()
    }

    pub const fn all() -> [PresentedDocument; 7] {
        [
            PresentedDocument::CommercialInvoice,
            PresentedDocument::BillOfLading,
            PresentedDocument::PackingList,
            PresentedDocument::CertificateOfOrigin,
            PresentedDocument::InsuranceCertificate,
            PresentedDocument::InspectionCertificate,
            PresentedDocument::WeightCertificate,
        ]
    }
}

/// Examiner-facing status of a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresentationStatus {
    #[default]
    Submitted,
    Compliant,
    Discrepant,
}

impl PresentationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PresentationStatus::Submitted => "Submitted",
            PresentationStatus::Compliant => "Compliant",
            PresentationStatus::Discrepant => "Discrepant",
        }
    }
}

/// One set of shipping documents presented under a credit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentPresentation {
    pub reference: LcReference,
    pub invoice_amount: f64,
    pub invoice_currency: String,
    pub invoice_date: String,
    pub bl_number: String,
    pub bl_date: String,
    pub vessel: String,
    pub shipment_date: String,
    pub port_of_loading: String,
    pub port_of_discharge: String,
    /// Presence markers per canonical document; "Yes"/"No"/empty as captured
    /// from the presentation checklist.
    pub documents: BTreeMap<PresentedDocument, String>,
    pub additional_documents: String,
    pub submitted_on: String,
    pub status: PresentationStatus,
}

/// Severity grading for an examination finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Major,
    Fatal,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Minor => "MINOR",
            Severity::Major => "MAJOR",
            Severity::Fatal => "FATAL",
        }
    }
}

/// Whether a discrepancy has been cleared by the examiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolutionStatus {
    #[default]
    Open,
    Resolved,
}

/// A single mismatch between the credit terms and a presentation. Only the
/// examiner produces these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub field: String,
    pub lc_value: String,
    pub document_value: String,
    pub severity: Severity,
    pub rule: String,
    pub description: String,
    pub resolution: ResolutionStatus,
}

/// Lifecycle of a requested amendment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmendmentStatus {
    #[default]
    Pending,
    Approved,
}

/// A requested change to one field of the credit, numbered per application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amendment {
    pub sequence: u32,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    pub reason: String,
    pub status: AmendmentStatus,
    pub fee: f64,
    pub mt707_text: Option<String>,
}

/// Fields an approved amendment may mutate on the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmendableField {
    Amount,
    TolerancePct,
    ExpiryDate,
    LatestShipmentDate,
    GoodsDescription,
    PortOfLoading,
    PortOfDischarge,
    PaymentTerms,
}

impl AmendableField {
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "amount" | "lc_amount" => Some(AmendableField::Amount),
            "tolerance" | "tolerance_pct" => Some(AmendableField::TolerancePct),
            "expiry_date" => Some(AmendableField::ExpiryDate),
            "latest_shipment_date" => Some(AmendableField::LatestShipmentDate),
            "goods_description" => Some(AmendableField::GoodsDescription),
            "port_of_loading" => Some(AmendableField::PortOfLoading),
            "port_of_discharge" => Some(AmendableField::PortOfDischarge),
            "payment_terms" => Some(AmendableField::PaymentTerms),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AmendableField::Amount => "LC Amount",
            AmendableField::TolerancePct => "Tolerance",
            AmendableField::ExpiryDate => "Expiry Date",
            AmendableField::LatestShipmentDate => "Latest Shipment Date",
            AmendableField::GoodsDescription => "Goods Description",
            AmendableField::PortOfLoading => "Port of Loading",
            AmendableField::PortOfDischarge => "Port of Discharge",
            AmendableField::PaymentTerms => "Payment Terms",
        }
    }

    /// Read the current value of the field off an application.
    pub fn current_value(self, application: &LcApplication) -> String {
        match self {
            AmendableField::Amount => format!("{:.2}", application.terms.amount),
            AmendableField::TolerancePct => format!("{}", application.terms.tolerance_pct),
            AmendableField::ExpiryDate => application.terms.expiry_date.clone(),
            AmendableField::LatestShipmentDate => {
                application.shipment.latest_shipment_date.clone()
            }
            AmendableField::GoodsDescription => application.goods.description.clone(),
            AmendableField::PortOfLoading => application.shipment.port_of_loading.clone(),
            AmendableField::PortOfDischarge => application.shipment.port_of_discharge.clone(),
            AmendableField::PaymentTerms => application.payment_terms.clone(),
        }
    }

    /// Mutate the application with the amended value. Numeric fields parse
    /// defensively; a non-numeric value becomes zero rather than an error so a
    /// half-filled amendment form cannot wedge the workflow.
    pub fn apply(self, application: &mut LcApplication, new_value: &str) {
        match self {
            AmendableField::Amount => {
                application.terms.amount = parse_decimal(new_value);
            }
            AmendableField::TolerancePct => {
                application.terms.tolerance_pct = parse_decimal(new_value);
            }
            AmendableField::ExpiryDate => {
                application.terms.expiry_date = new_value.trim().to_string();
            }
            AmendableField::LatestShipmentDate => {
                application.shipment.latest_shipment_date = new_value.trim().to_string();
            }
            AmendableField::GoodsDescription => {
                application.goods.description = new_value.trim().to_string();
            }
            AmendableField::PortOfLoading => {
                application.shipment.port_of_loading = new_value.trim().to_string();
            }
            AmendableField::PortOfDischarge => {
                application.shipment.port_of_discharge = new_value.trim().to_string();
            }
            AmendableField::PaymentTerms => {
                application.payment_terms = new_value.trim().to_string();
            }
        }
    }
}

/// Defensive decimal parse used wherever form input crosses into numeric
/// fields: strips grouping commas, tolerates surrounding noise, and maps
/// anything unparseable to zero.
pub fn parse_decimal(raw: &str) -> f64 {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .unwrap_or(0.0)
}
