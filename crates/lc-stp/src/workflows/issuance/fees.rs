use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates;
use super::domain::LcApplication;

/// Average days per month used to band tenors.
const DAYS_PER_MONTH: f64 = 30.44;

/// Tenor falls back to this when the expiry date cannot be parsed.
const FALLBACK_TENOR_MONTHS: u32 = 3;

/// One commission band: applies to tenors up to `max_months` inclusive; `None`
/// is the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TenorBand {
    pub max_months: Option<u32>,
    pub rate_pct: f64,
}

/// Fee schedule configuration injected into the calculator. Never stored as
/// mutable module state so tests can substitute alternate schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeConfig {
    pub bands: Vec<TenorBand>,
    pub negotiation_rate_pct: f64,
    pub confirmation_rate_pct: f64,
    pub advising_fee_inr: f64,
    pub courier_fee_inr: f64,
    pub amendment_fee_inr: f64,
    pub gst_rate: f64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            bands: vec![
                TenorBand {
                    max_months: Some(3),
                    rate_pct: 0.30,
                },
                TenorBand {
                    max_months: Some(6),
                    rate_pct: 0.60,
                },
                TenorBand {
                    max_months: Some(12),
                    rate_pct: 1.20,
                },
                TenorBand {
                    max_months: None,
                    rate_pct: 1.55,
                },
            ],
            negotiation_rate_pct: 0.125,
            confirmation_rate_pct: 0.15,
            advising_fee_inr: 5000.0,
            courier_fee_inr: 3500.0,
            amendment_fee_inr: 2500.0,
            gst_rate: 0.18,
        }
    }
}

/// One row of the itemised fee table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    pub label: String,
    pub currency: String,
    pub amount: f64,
}

/// Computed fee breakdown for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub tenor_months: u32,
    pub applied_rate_pct: f64,
    pub lines: Vec<FeeLine>,
    pub variable_subtotal: f64,
    pub fixed_subtotal: f64,
    pub subtotal: f64,
    pub gst: f64,
    pub grand_total: f64,
    /// Quoted separately; not summed into the grand total.
    pub amendment_fee_inr: f64,
    pub note: String,
}

/// Round half-up to two decimals via multiply-round-divide.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Months from `as_of` to the expiry date, floored at one month; the fallback
/// tenor applies when the expiry date does not parse.
pub fn tenor_months(expiry_date: &str, as_of: NaiveDate) -> u32 {
    match dates::parse_flexible(expiry_date) {
        Some(expiry) => {
            let days = (expiry - as_of).num_days() as f64;
            let months = (days / DAYS_PER_MONTH).ceil() as i64;
            months.max(1) as u32
        }
        None => FALLBACK_TENOR_MONTHS,
    }
}

fn band_rate(config: &FeeConfig, tenor: u32) -> f64 {
    for band in &config.bands {
        match band.max_months {
            Some(max) if tenor <= max => return band.rate_pct,
            Some(_) => continue,
            None => return band.rate_pct,
        }
    }
    config.bands.last().map(|band| band.rate_pct).unwrap_or(0.0)
}

/// Compute the fee breakdown for an application as of the given date. Pure;
/// runs happily on partial data for preview purposes.
pub fn calculate(application: &LcApplication, config: &FeeConfig, as_of: NaiveDate) -> FeeSchedule {
    let amount = application.terms.amount.max(0.0);
    let currency = if application.terms.currency.trim().is_empty() {
        "USD".to_string()
    } else {
        application.terms.currency.trim().to_ascii_uppercase()
    };

    let tenor = tenor_months(&application.terms.expiry_date, as_of);
    let rate = band_rate(config, tenor);

    let issuance_commission = round2(amount * rate / 100.0);
    let negotiation_fee = round2(amount * config.negotiation_rate_pct / 100.0);
    let confirmation_premium = if application.banks.has_confirming_bank() {
        Some(round2(amount * config.confirmation_rate_pct / 100.0))
    } else {
        None
    };

    let mut lines = vec![
        FeeLine {
            label: format!("Issuance commission ({rate}% for {tenor} month tenor)"),
            currency: currency.clone(),
            amount: issuance_commission,
        },
        FeeLine {
            label: format!(
                "Negotiation/acceptance fee ({}%)",
                config.negotiation_rate_pct
            ),
            currency: currency.clone(),
            amount: negotiation_fee,
        },
    ];
    if let Some(premium) = confirmation_premium {
        lines.push(FeeLine {
            label: format!("Confirmation premium ({}%)", config.confirmation_rate_pct),
            currency: currency.clone(),
            amount: premium,
        });
    }
    lines.push(FeeLine {
        label: "Advising fee".to_string(),
        currency: "INR".to_string(),
        amount: config.advising_fee_inr,
    });
    lines.push(FeeLine {
        label: "Courier and SWIFT charges".to_string(),
        currency: "INR".to_string(),
        amount: config.courier_fee_inr,
    });

    let variable_subtotal = round2(
        issuance_commission + negotiation_fee + confirmation_premium.unwrap_or(0.0),
    );
    let fixed_subtotal = round2(config.advising_fee_inr + config.courier_fee_inr);
    let subtotal = round2(variable_subtotal + fixed_subtotal);
    let gst = round2(
        round2(variable_subtotal * config.gst_rate) + round2(fixed_subtotal * config.gst_rate),
    );
    let grand_total = round2(subtotal + gst);

    FeeSchedule {
        tenor_months: tenor,
        applied_rate_pct: rate,
        lines,
        variable_subtotal,
        fixed_subtotal,
        subtotal,
        gst,
        grand_total,
        amendment_fee_inr: config.amendment_fee_inr,
        note: "Rates are indicative and subject to the bank's schedule of charges at the time of issuance. Amendment fee quoted separately per amendment.".to_string(),
    }
}
