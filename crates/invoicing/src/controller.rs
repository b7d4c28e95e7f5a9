//! Form state controller: the single owner of the invoice being edited.
//!
//! Every edit goes through the [`InvoiceForm`] aggregate (command → events →
//! apply). The controller never rejects user input: malformed numbers become
//! zero and edits aimed at a non-existent item are ignored with a warning.

use chrono::Utc;
use serde::Deserialize;

use invoicedesk_core::{Aggregate, AggregateRoot, DomainError, DomainResult, SessionId};
use invoicedesk_events::Event;

use crate::form::{AddItem, InvoiceCommand, InvoiceEvent, InvoiceForm, UpdateField, UpdateItem};
use crate::record::{InvoiceField, InvoiceRecord, ItemField};

/// One event from the input surface, with field names and values as raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormInput {
    FieldEdited { field: String, value: String },
    ItemEdited { index: usize, field: String, value: String },
    ItemAdded,
}

impl FormInput {
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("malformed form input: {e}")))
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    form: InvoiceForm,
    history: Vec<InvoiceEvent>,
}

impl FormController {
    /// Start a new editing session with a default record.
    pub fn new() -> Self {
        Self::with_session(SessionId::new())
    }

    pub fn with_session(session_id: SessionId) -> Self {
        tracing::debug!(session_id = %session_id, "invoice editing session started");
        Self {
            form: InvoiceForm::new(session_id),
            history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        *self.form.id()
    }

    /// Number of edits applied so far.
    pub fn version(&self) -> u64 {
        self.form.version()
    }

    pub fn record(&self) -> &InvoiceRecord {
        self.form.record()
    }

    /// Current state, detached from the controller, for projection or export.
    pub fn snapshot(&self) -> InvoiceRecord {
        self.form.record().clone()
    }

    /// Events applied in this session, oldest first.
    pub fn history(&self) -> &[InvoiceEvent] {
        &self.history
    }

    /// Set a scalar field. Numeric fields parse leniently; never fails.
    pub fn update_field(&mut self, field: InvoiceField, raw: &str) {
        let cmd = InvoiceCommand::UpdateField(UpdateField {
            session_id: self.session_id(),
            field,
            raw: raw.to_string(),
            occurred_at: Utc::now(),
        });
        if let Err(err) = self.execute(cmd) {
            tracing::warn!(field = field.name(), error = %err, "field edit ignored");
        }
    }

    /// Set a scalar field addressed by its wire name.
    ///
    /// Fails only when `name` is not a known field.
    pub fn update_field_by_name(&mut self, name: &str, raw: &str) -> DomainResult<()> {
        let field: InvoiceField = name.parse()?;
        self.update_field(field, raw);
        Ok(())
    }

    /// Edit one cell of the item table and recompute that item's total.
    ///
    /// An out-of-range `index` leaves the record unchanged.
    pub fn update_item(&mut self, index: usize, field: ItemField, raw: &str) {
        if let Err(err) = self.try_update_item(index, field, raw) {
            tracing::warn!(index, field = field.name(), error = %err, "item edit ignored");
        }
    }

    /// Like [`update_item`](Self::update_item), but reports an out-of-range index.
    pub fn try_update_item(&mut self, index: usize, field: ItemField, raw: &str) -> DomainResult<()> {
        self.execute(InvoiceCommand::UpdateItem(UpdateItem {
            session_id: self.session_id(),
            index,
            field,
            raw: raw.to_string(),
            occurred_at: Utc::now(),
        }))
    }

    /// Edit an item cell addressed by its wire name.
    ///
    /// Fails only when `name` is not a known item field.
    pub fn update_item_by_name(&mut self, index: usize, name: &str, raw: &str) -> DomainResult<()> {
        let field: ItemField = name.parse()?;
        self.update_item(index, field, raw);
        Ok(())
    }

    /// Append a blank item.
    pub fn add_item(&mut self) {
        let cmd = InvoiceCommand::AddItem(AddItem {
            session_id: self.session_id(),
            occurred_at: Utc::now(),
        });
        if let Err(err) = self.execute(cmd) {
            tracing::warn!(error = %err, "add item ignored");
        }
    }

    /// Sum of all line totals, recomputed on every call.
    pub fn compute_subtotal(&self) -> f64 {
        self.form.record().subtotal()
    }

    /// Apply one input-surface event.
    pub fn dispatch(&mut self, input: FormInput) -> DomainResult<()> {
        match input {
            FormInput::FieldEdited { field, value } => self.update_field_by_name(&field, &value),
            FormInput::ItemEdited { index, field, value } => {
                self.update_item_by_name(index, &field, &value)
            }
            FormInput::ItemAdded => {
                self.add_item();
                Ok(())
            }
        }
    }

    fn execute(&mut self, cmd: InvoiceCommand) -> DomainResult<()> {
        let events = self.form.handle(&cmd)?;
        for event in &events {
            self.form.apply(event);
            tracing::debug!(
                session_id = %self.session_id(),
                event_type = event.event_type(),
                version = self.form.version(),
                "applied form event"
            );
        }
        self.history.extend(events);
        Ok(())
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn copper_line_totals() {
        let mut controller = FormController::new();
        controller.update_item(0, ItemField::Description, "Copper");
        controller.update_item(0, ItemField::UnitPrice, "10");
        controller.update_item(0, ItemField::NetWeight, "2");

        let item = &controller.record().items()[0];
        assert_eq!(item.description(), "Copper");
        assert_eq!(item.total_amount(), 20.0);
        assert_eq!(controller.compute_subtotal(), 20.0);
    }

    #[test]
    fn malformed_paid_amount_is_stored_as_zero() {
        let mut controller = FormController::new();
        controller.update_field_by_name("paidAmount", "abc").unwrap();
        assert_eq!(controller.record().paid_amount(), Some(0.0));
    }

    #[test]
    fn text_fields_are_stored_verbatim() {
        let mut controller = FormController::new();
        controller.update_field(InvoiceField::InvoiceNumber, "INV-007");
        controller.update_field_by_name("TRN", "100 200").unwrap();
        controller.update_field(InvoiceField::InvoiceDate, "2024-03-01");

        let record = controller.record();
        assert_eq!(record.invoice_number(), "INV-007");
        assert_eq!(record.tax_registration_number(), "100 200");
        assert_eq!(record.invoice_date(), "2024-03-01");
    }

    #[test]
    fn unknown_field_name_is_reported_and_state_kept() {
        let mut controller = FormController::new();
        let before = controller.snapshot();

        let err = controller.update_field_by_name("driverTip", "5").unwrap_err();
        assert_eq!(err, DomainError::UnknownField("driverTip".to_string()));
        assert_eq!(controller.snapshot(), before);
        assert_eq!(controller.version(), 0);
    }

    #[test]
    fn out_of_range_item_edit_is_ignored() {
        let mut controller = FormController::new();
        let before = controller.snapshot();

        controller.update_item(3, ItemField::UnitPrice, "9");
        assert_eq!(controller.snapshot(), before);
        assert_eq!(controller.version(), 0);

        let err = controller
            .try_update_item(3, ItemField::UnitPrice, "9")
            .unwrap_err();
        assert_eq!(err, DomainError::ItemOutOfRange { index: 3, len: 1 });
    }

    #[test]
    fn add_item_appends_blank_rows_in_order() {
        let mut controller = FormController::new();
        controller.update_item(0, ItemField::Description, "first");
        controller.add_item();
        controller.add_item();
        controller.update_item(2, ItemField::Description, "third");

        let items = controller.record().items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].description(), "first");
        assert_eq!(items[1].description(), "");
        assert_eq!(items[1].unit_price(), 0.0);
        assert_eq!(items[2].description(), "third");
    }

    #[test]
    fn dispatch_accepts_json_input_events() {
        let mut controller = FormController::new();
        for json in [
            r#"{"type":"itemAdded"}"#,
            r#"{"type":"itemEdited","index":1,"field":"unitPrice","value":"4"}"#,
            r#"{"type":"itemEdited","index":1,"field":"netWeight","value":"2.5"}"#,
            r#"{"type":"fieldEdited","field":"companyName","value":"seller2"}"#,
        ] {
            controller.dispatch(FormInput::from_json(json).unwrap()).unwrap();
        }

        assert_eq!(controller.record().items()[1].total_amount(), 10.0);
        assert_eq!(controller.record().seller_id().as_str(), "seller2");
        assert_eq!(controller.version(), 4);
    }

    #[test]
    fn malformed_input_json_is_a_validation_error() {
        let err = FormInput::from_json(r#"{"type":"resize"}"#).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn replaying_history_rebuilds_the_record() {
        let mut controller = FormController::new();
        controller.update_field(InvoiceField::CustomerName, "Acme");
        controller.add_item();
        controller.update_item(1, ItemField::UnitPrice, "3");
        controller.update_item(1, ItemField::NetWeight, "7");

        let mut replayed = InvoiceForm::new(controller.session_id());
        for event in controller.history() {
            replayed.apply(event);
        }
        assert_eq!(replayed.record(), controller.record());
        assert_eq!(replayed.version(), controller.version());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any price/weight edit, total == price * weight exactly.
        #[test]
        fn item_total_is_price_times_weight(
            edits in prop::collection::vec((0usize..4, any::<bool>(), -1_000.0f64..1_000.0), 1..20)
        ) {
            let mut controller = FormController::new();
            for _ in 0..3 {
                controller.add_item();
            }
            for (index, is_price, value) in edits {
                let field = if is_price { ItemField::UnitPrice } else { ItemField::NetWeight };
                controller.update_item(index, field, &value.to_string());
            }

            for item in controller.record().items() {
                prop_assert_eq!(item.total_amount(), item.unit_price() * item.net_weight());
            }
        }

        /// Property: subtotal is the sum of line totals regardless of insertion order.
        #[test]
        fn subtotal_ignores_insertion_order(
            lines in prop::collection::vec((0u32..10_000, 0u32..1_000), 1..10)
        ) {
            let build = |lines: &[(u32, u32)]| {
                let mut controller = FormController::new();
                for (i, (price, weight)) in lines.iter().enumerate() {
                    if i > 0 {
                        controller.add_item();
                    }
                    controller.update_item(i, ItemField::UnitPrice, &price.to_string());
                    controller.update_item(i, ItemField::NetWeight, &weight.to_string());
                }
                controller
            };

            let forward = build(&lines[..]);
            let mut reversed_lines = lines.clone();
            reversed_lines.reverse();
            let reversed = build(&reversed_lines[..]);

            let expected: f64 = forward.record().items().iter().map(|i| i.total_amount()).sum();
            prop_assert_eq!(forward.compute_subtotal(), expected);
            // Integer-valued totals make the sum exact in any order.
            prop_assert_eq!(forward.compute_subtotal(), reversed.compute_subtotal());
        }
    }
}
