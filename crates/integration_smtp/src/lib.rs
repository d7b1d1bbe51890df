//! Outbound SMTP integration
//!
//! A small async SMTP client for sending the assistant's delivery
//! emails through any standard submission server. Supports STARTTLS
//! (the default, port 587) and implicit TLS (port 465), with
//! AUTH PLAIN authentication. Each send opens, uses and closes its own
//! connection.

mod client;

pub use client::{OutboundMessage, SmtpConfig, SmtpError, SmtpMailer};
