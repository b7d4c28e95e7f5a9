use invoicedesk_core::SessionId;

/// A command targets a specific editing session (command abstraction).
///
/// Commands represent **intent**: "set the paid amount to `abc`". They are
/// transient and are turned into events by the aggregate that owns the session.
///
/// ## Command vs Event
///
/// - **Command**: raw user intent, carrying the unparsed input string
/// - **Event**: the accepted change, carrying the value actually stored
///
/// Commands must be cloneable (the controller may log or replay them) and own
/// all their data.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_session_id(&self) -> SessionId;
}
