use core::str::FromStr;

use serde::{Deserialize, Serialize};

use invoicedesk_core::numeric::parse_lenient;
use invoicedesk_core::{DomainError, DomainResult, ValueObject};

use crate::seller::SellerId;

/// One row of goods on the invoice.
///
/// Invariant: `total_amount == unit_price * net_weight`. The total has no
/// setter; it is recomputed whenever price or weight changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    description: String,
    unit_price: f64,
    net_weight: f64,
    total_amount: f64,
}

impl ValueObject for LineItem {}

impl LineItem {
    /// Empty description, all numbers zero.
    pub fn blank() -> Self {
        Self::new("", 0.0, 0.0)
    }

    pub fn new(description: impl Into<String>, unit_price: f64, net_weight: f64) -> Self {
        Self {
            description: description.into(),
            unit_price,
            net_weight,
            total_amount: unit_price * net_weight,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn net_weight(&self) -> f64 {
        self.net_weight
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub(crate) fn apply_change(&mut self, change: &ItemChange) {
        match change {
            ItemChange::Description(text) => self.description = text.clone(),
            ItemChange::UnitPrice(value) => self.unit_price = *value,
            ItemChange::NetWeight(value) => self.net_weight = *value,
        }
        self.total_amount = self.unit_price * self.net_weight;
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::blank()
    }
}

/// Editable fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Description,
    UnitPrice,
    NetWeight,
}

impl ItemField {
    pub fn name(self) -> &'static str {
        match self {
            ItemField::Description => "description",
            ItemField::UnitPrice => "unitPrice",
            ItemField::NetWeight => "netWeight",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, ItemField::Description)
    }
}

impl FromStr for ItemField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(ItemField::Description),
            "unitPrice" => Ok(ItemField::UnitPrice),
            "netWeight" => Ok(ItemField::NetWeight),
            other => Err(DomainError::unknown_field(other)),
        }
    }
}

/// A typed item edit, produced from raw form input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ItemChange {
    Description(String),
    UnitPrice(f64),
    NetWeight(f64),
}

impl ItemChange {
    /// Numeric fields are parsed leniently, text is kept verbatim.
    pub fn from_raw(field: ItemField, raw: &str) -> Self {
        match field {
            ItemField::Description => ItemChange::Description(raw.to_string()),
            ItemField::UnitPrice => ItemChange::UnitPrice(parse_lenient(raw)),
            ItemField::NetWeight => ItemChange::NetWeight(parse_lenient(raw)),
        }
    }

    pub fn field(&self) -> ItemField {
        match self {
            ItemChange::Description(_) => ItemField::Description,
            ItemChange::UnitPrice(_) => ItemField::UnitPrice,
            ItemChange::NetWeight(_) => ItemField::NetWeight,
        }
    }
}

/// Scalar fields of the invoice record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceField {
    SellerId,
    InvoiceNumber,
    InvoiceDate,
    CustomerName,
    TaxRegistrationNumber,
    CustomerAddress,
    PaidAmount,
    Adjustment,
}

impl InvoiceField {
    pub const ALL: [InvoiceField; 8] = [
        InvoiceField::SellerId,
        InvoiceField::InvoiceNumber,
        InvoiceField::InvoiceDate,
        InvoiceField::CustomerName,
        InvoiceField::TaxRegistrationNumber,
        InvoiceField::CustomerAddress,
        InvoiceField::PaidAmount,
        InvoiceField::Adjustment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InvoiceField::SellerId => "sellerId",
            InvoiceField::InvoiceNumber => "invoiceNumber",
            InvoiceField::InvoiceDate => "invoiceDate",
            InvoiceField::CustomerName => "customerName",
            InvoiceField::TaxRegistrationNumber => "taxRegistrationNumber",
            InvoiceField::CustomerAddress => "customerAddress",
            InvoiceField::PaidAmount => "paidAmount",
            InvoiceField::Adjustment => "adjustment",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, InvoiceField::PaidAmount | InvoiceField::Adjustment)
    }
}

impl FromStr for InvoiceField {
    type Err = DomainError;

    /// Accepts the canonical names plus the older form names
    /// `companyName` and `TRN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "companyName" => return Ok(InvoiceField::SellerId),
            "TRN" => return Ok(InvoiceField::TaxRegistrationNumber),
            _ => {}
        }
        InvoiceField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| DomainError::unknown_field(s))
    }
}

/// A typed scalar edit, one variant per field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldChange {
    SellerId(SellerId),
    InvoiceNumber(String),
    InvoiceDate(String),
    CustomerName(String),
    TaxRegistrationNumber(String),
    CustomerAddress(String),
    PaidAmount(f64),
    Adjustment(f64),
}

impl FieldChange {
    /// Numeric fields are parsed leniently, text is kept verbatim.
    pub fn from_raw(field: InvoiceField, raw: &str) -> Self {
        match field {
            InvoiceField::SellerId => FieldChange::SellerId(SellerId::new(raw)),
            InvoiceField::InvoiceNumber => FieldChange::InvoiceNumber(raw.to_string()),
            InvoiceField::InvoiceDate => FieldChange::InvoiceDate(raw.to_string()),
            InvoiceField::CustomerName => FieldChange::CustomerName(raw.to_string()),
            InvoiceField::TaxRegistrationNumber => {
                FieldChange::TaxRegistrationNumber(raw.to_string())
            }
            InvoiceField::CustomerAddress => FieldChange::CustomerAddress(raw.to_string()),
            InvoiceField::PaidAmount => FieldChange::PaidAmount(parse_lenient(raw)),
            InvoiceField::Adjustment => FieldChange::Adjustment(parse_lenient(raw)),
        }
    }

    pub fn field(&self) -> InvoiceField {
        match self {
            FieldChange::SellerId(_) => InvoiceField::SellerId,
            FieldChange::InvoiceNumber(_) => InvoiceField::InvoiceNumber,
            FieldChange::InvoiceDate(_) => InvoiceField::InvoiceDate,
            FieldChange::CustomerName(_) => InvoiceField::CustomerName,
            FieldChange::TaxRegistrationNumber(_) => InvoiceField::TaxRegistrationNumber,
            FieldChange::CustomerAddress(_) => InvoiceField::CustomerAddress,
            FieldChange::PaidAmount(_) => InvoiceField::PaidAmount,
            FieldChange::Adjustment(_) => InvoiceField::Adjustment,
        }
    }
}

/// The editable invoice.
///
/// Invariant: `items` is never empty. A new record starts with exactly one
/// blank item and there is no removal operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    seller_id: SellerId,
    invoice_number: String,
    invoice_date: String,
    customer_name: String,
    tax_registration_number: String,
    customer_address: String,
    items: Vec<LineItem>,
    paid_amount: Option<f64>,
    adjustment: Option<f64>,
}

impl InvoiceRecord {
    pub fn new() -> Self {
        Self {
            seller_id: SellerId::default(),
            invoice_number: String::new(),
            invoice_date: String::new(),
            customer_name: String::new(),
            tax_registration_number: String::new(),
            customer_address: String::new(),
            items: vec![LineItem::blank()],
            paid_amount: None,
            adjustment: None,
        }
    }

    pub fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// Date as entered on the form (usually `YYYY-MM-DD`, possibly empty).
    pub fn invoice_date(&self) -> &str {
        &self.invoice_date
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn tax_registration_number(&self) -> &str {
        &self.tax_registration_number
    }

    pub fn customer_address(&self) -> &str {
        &self.customer_address
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn paid_amount(&self) -> Option<f64> {
        self.paid_amount
    }

    pub fn adjustment(&self) -> Option<f64> {
        self.adjustment
    }

    /// Sum of the line totals. Recomputed on every call.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::total_amount).sum()
    }

    /// Serialize the record for handing to an external collaborator.
    pub fn to_json(&self) -> DomainResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| DomainError::serialization(e.to_string()))
    }

    pub(crate) fn apply_field(&mut self, change: &FieldChange) {
        match change {
            FieldChange::SellerId(id) => self.seller_id = id.clone(),
            FieldChange::InvoiceNumber(v) => self.invoice_number = v.clone(),
            FieldChange::InvoiceDate(v) => self.invoice_date = v.clone(),
            FieldChange::CustomerName(v) => self.customer_name = v.clone(),
            FieldChange::TaxRegistrationNumber(v) => self.tax_registration_number = v.clone(),
            FieldChange::CustomerAddress(v) => self.customer_address = v.clone(),
            FieldChange::PaidAmount(v) => self.paid_amount = Some(*v),
            FieldChange::Adjustment(v) => self.adjustment = Some(*v),
        }
    }

    /// Returns `false` (and changes nothing) when `index` is out of range.
    pub(crate) fn apply_item(&mut self, index: usize, change: &ItemChange) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.apply_change(change);
                true
            }
            None => false,
        }
    }

    pub(crate) fn push_blank_item(&mut self) {
        self.items.push(LineItem::blank());
    }
}

impl Default for InvoiceRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_one_blank_item() {
        let record = InvoiceRecord::new();
        assert_eq!(record.items(), &[LineItem::blank()]);
        assert_eq!(record.paid_amount(), None);
        assert_eq!(record.adjustment(), None);
        assert_eq!(record.seller_id().as_str(), "seller1");
    }

    #[test]
    fn item_total_follows_price_and_weight() {
        let mut item = LineItem::blank();
        item.apply_change(&ItemChange::UnitPrice(10.0));
        assert_eq!(item.total_amount(), 0.0);
        item.apply_change(&ItemChange::NetWeight(2.0));
        assert_eq!(item.total_amount(), 20.0);
        item.apply_change(&ItemChange::Description("Copper".to_string()));
        assert_eq!(item.total_amount(), 20.0);
        assert_eq!(item.description(), "Copper");
    }

    #[test]
    fn field_names_round_trip() {
        for field in InvoiceField::ALL {
            assert_eq!(field.name().parse::<InvoiceField>().unwrap(), field);
        }
        for field in [ItemField::Description, ItemField::UnitPrice, ItemField::NetWeight] {
            assert_eq!(field.name().parse::<ItemField>().unwrap(), field);
        }
    }

    #[test]
    fn legacy_form_names_are_accepted() {
        assert_eq!("companyName".parse::<InvoiceField>().unwrap(), InvoiceField::SellerId);
        assert_eq!(
            "TRN".parse::<InvoiceField>().unwrap(),
            InvoiceField::TaxRegistrationNumber
        );
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        let err = "vehicleNo".parse::<InvoiceField>().unwrap_err();
        assert_eq!(err, DomainError::UnknownField("vehicleNo".to_string()));
        assert!("totalAmount".parse::<ItemField>().is_err());
    }

    #[test]
    fn raw_values_are_parsed_by_field_type() {
        assert_eq!(
            FieldChange::from_raw(InvoiceField::PaidAmount, "abc"),
            FieldChange::PaidAmount(0.0)
        );
        assert_eq!(
            FieldChange::from_raw(InvoiceField::InvoiceNumber, " 007 "),
            FieldChange::InvoiceNumber(" 007 ".to_string())
        );
        assert_eq!(
            ItemChange::from_raw(ItemField::NetWeight, "1.5"),
            ItemChange::NetWeight(1.5)
        );
        assert!(InvoiceField::Adjustment.is_numeric());
        assert!(!InvoiceField::InvoiceDate.is_numeric());
        assert!(ItemField::UnitPrice.is_numeric());
    }

    #[test]
    fn snapshot_json_uses_camel_case_keys() {
        let json = InvoiceRecord::new().to_json().unwrap();
        assert_eq!(json["sellerId"], "seller1");
        assert_eq!(json["taxRegistrationNumber"], "");
        assert!(json["paidAmount"].is_null());
        assert_eq!(json["items"][0]["totalAmount"], 0.0);
    }
}
