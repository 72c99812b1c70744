//! Services - use cases over the repository ports
//!
//! Services own the existence checks and turn a missing entity into
//! [`crate::Error::NotFound`]; repositories only report `None`.

pub mod decisions;
pub mod officials;

pub use decisions::DecisionsService;
pub use officials::ElectedOfficialsService;
