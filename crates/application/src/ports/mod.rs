//! Ports - Interfaces implemented by infrastructure adapters

mod document_port;
mod email_port;
mod inference_port;

pub use document_port::{DocumentError, DocumentPort};
pub use email_port::{EmailError, EmailPort, OutgoingEmail};
pub use inference_port::{GenerationOptions, InferencePort, InferenceResult};
