use chrono::{DateTime, Utc};
use serde::Serialize;

use invoicedesk_core::{Aggregate, AggregateRoot, DomainError, SessionId};
use invoicedesk_events::{Command, Event};

use crate::record::{FieldChange, InvoiceField, InvoiceRecord, ItemChange, ItemField};

/// Aggregate root: the invoice being edited in one session.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    id: SessionId,
    record: InvoiceRecord,
    version: u64,
}

impl InvoiceForm {
    /// A fresh form: default record with one blank item, version 0.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            record: InvoiceRecord::new(),
            version: 0,
        }
    }

    pub fn record(&self) -> &InvoiceRecord {
        &self.record
    }
}

impl AggregateRoot for InvoiceForm {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: UpdateField (raw form input for a scalar field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateField {
    pub session_id: SessionId,
    pub field: InvoiceField,
    pub raw: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateItem (raw form input for one cell of the item table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateItem {
    pub session_id: SessionId,
    pub index: usize,
    pub field: ItemField,
    pub raw: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceCommand {
    UpdateField(UpdateField),
    UpdateItem(UpdateItem),
    AddItem(AddItem),
}

impl Command for InvoiceCommand {
    fn target_session_id(&self) -> SessionId {
        match self {
            InvoiceCommand::UpdateField(c) => c.session_id,
            InvoiceCommand::UpdateItem(c) => c.session_id,
            InvoiceCommand::AddItem(c) => c.session_id,
        }
    }
}

/// Event: FieldUpdated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldUpdated {
    pub session_id: SessionId,
    pub change: FieldChange,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated. The stored line total is recomputed on apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemUpdated {
    pub session_id: SessionId,
    pub index: usize,
    pub change: ItemChange,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemAdded {
    pub session_id: SessionId,
    /// Position of the new item.
    pub index: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InvoiceEvent {
    FieldUpdated(FieldUpdated),
    ItemUpdated(ItemUpdated),
    ItemAdded(ItemAdded),
}

impl Event for InvoiceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InvoiceEvent::FieldUpdated(_) => "invoicing.form.field_updated",
            InvoiceEvent::ItemUpdated(_) => "invoicing.form.item_updated",
            InvoiceEvent::ItemAdded(_) => "invoicing.form.item_added",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InvoiceEvent::FieldUpdated(e) => e.occurred_at,
            InvoiceEvent::ItemUpdated(e) => e.occurred_at,
            InvoiceEvent::ItemAdded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InvoiceForm {
    type Command = InvoiceCommand;
    type Event = InvoiceEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InvoiceEvent::FieldUpdated(e) => self.record.apply_field(&e.change),
            InvoiceEvent::ItemUpdated(e) => {
                // `handle` only emits in-range indices; a foreign event is a no-op.
                let _ = self.record.apply_item(e.index, &e.change);
            }
            InvoiceEvent::ItemAdded(_) => self.record.push_blank_item(),
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if command.target_session_id() != self.id {
            return Err(DomainError::SessionMismatch);
        }

        match command {
            InvoiceCommand::UpdateField(cmd) => Ok(vec![InvoiceEvent::FieldUpdated(FieldUpdated {
                session_id: cmd.session_id,
                change: FieldChange::from_raw(cmd.field, &cmd.raw),
                occurred_at: cmd.occurred_at,
            })]),
            InvoiceCommand::UpdateItem(cmd) => self.handle_update_item(cmd),
            InvoiceCommand::AddItem(cmd) => Ok(vec![InvoiceEvent::ItemAdded(ItemAdded {
                session_id: cmd.session_id,
                index: self.record.items().len(),
                occurred_at: cmd.occurred_at,
            })]),
        }
    }
}

impl InvoiceForm {
    fn handle_update_item(&self, cmd: &UpdateItem) -> Result<Vec<InvoiceEvent>, DomainError> {
        let len = self.record.items().len();
        if cmd.index >= len {
            return Err(DomainError::item_out_of_range(cmd.index, len));
        }

        Ok(vec![InvoiceEvent::ItemUpdated(ItemUpdated {
            session_id: cmd.session_id,
            index: cmd.index,
            change: ItemChange::from_raw(cmd.field, &cmd.raw),
            occurred_at: cmd.occurred_at,
        })])
    }
}
