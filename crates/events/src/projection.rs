/// A projection derives a read-only view from a snapshot of domain state.
///
/// Projections implement the read side of the editor: the form owns and mutates
/// the record, a projection turns the current snapshot into something to display.
///
/// ## Purity
///
/// `project` must be a **pure function** of its input. Projecting the same
/// snapshot twice yields identical views, there is no incremental update and no
/// cached state between calls. Re-projection after an edit is an explicit call
/// on the fresh snapshot, not a subscription.
///
/// ## Error Handling
///
/// Projections don't return errors. Every snapshot produces some view, even a
/// numerically nonsensical one; lookups that miss fall back to defaults.
pub trait Projection {
    type Source;
    type View;

    /// Build the view for `source`.
    fn project(&self, source: &Self::Source) -> Self::View;
}
