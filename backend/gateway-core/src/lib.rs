//! Embeddable gateway core.
//!
//! The host commerce platform constructs one [`payments::Payments`] service
//! from its [`configs::Config`] and its implementations of the platform
//! ports in [`interfaces::platform`], then drives checkout submission and
//! webhook processing through it. There is no transport layer here; the
//! host's own HTTP stack hands request details in and writes the returned
//! acknowledgements out.

pub mod configs;
pub mod error;
pub mod logger;
pub mod payments;
pub mod translations;

pub use self::{configs::Config, payments::Payments};
