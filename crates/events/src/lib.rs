//! Commands, events and projections shared by the invoice domain crates.

pub mod command;
pub mod event;
pub mod projection;

pub use command::Command;
pub use event::Event;
pub use projection::Projection;
