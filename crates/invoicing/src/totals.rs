//! Aggregate amounts derived from an invoice record.

use serde::Serialize;

use invoicedesk_core::numeric::{MONEY_DECIMALS, WEIGHT_DECIMALS, round_to};

use crate::record::InvoiceRecord;

/// Fixed value-added tax rate (5%).
pub const VAT_RATE: f64 = 0.05;

/// Derived totals, evaluated in a fixed order:
///
/// 1. `total_weight` = sum of net weights, rounded to 3 decimals
/// 2. `total_amount` = sum of line totals (not rounded)
/// 3. `vat` = `total_amount * VAT_RATE`, rounded to 2 decimals
/// 4. `grand_total` = `total_amount + vat`
/// 5. `change_amount` = paid − grand total − adjustment (unset counts as 0)
///
/// Nothing is clamped: an underpaid invoice has a negative change amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub total_weight: f64,
    pub total_amount: f64,
    pub vat: f64,
    pub grand_total: f64,
    pub paid_amount: f64,
    pub adjustment: f64,
    pub change_amount: f64,
}

impl InvoiceTotals {
    pub fn compute(record: &InvoiceRecord) -> Self {
        let total_weight = round_to(
            record.items().iter().map(|i| i.net_weight()).sum(),
            WEIGHT_DECIMALS,
        );
        let total_amount = record.subtotal();
        let vat = round_to(total_amount * VAT_RATE, MONEY_DECIMALS);
        let grand_total = total_amount + vat;
        let paid_amount = record.paid_amount().unwrap_or(0.0);
        let adjustment = record.adjustment().unwrap_or(0.0);
        let change_amount = paid_amount - grand_total - adjustment;

        Self {
            total_weight,
            total_amount,
            vat,
            grand_total,
            paid_amount,
            adjustment,
            change_amount,
        }
    }
}
