mod argument;
mod event;
mod frame;
mod sanitize;
mod severity;

pub use argument::*;
pub use event::*;
pub use frame::*;
pub(crate) use sanitize::*;
pub use severity::*;
