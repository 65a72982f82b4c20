//! HTTP handlers.

mod notifications;
mod system;


pub use notifications::*;
pub use system::*;
