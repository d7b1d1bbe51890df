//! Value Objects - Immutable, identity-less domain primitives

mod email_address;

pub use email_address::EmailAddress;
