//! Consultation record data model.
//!
//! Everything here is supplied by the data-loading collaborator as JSON
//! (camelCase keys) and stays immutable for the lifetime of one page view.

pub mod consultation;
pub mod enums;
pub mod medication;
pub mod patient;

#[cfg(test)]
pub(crate) mod fixtures;

pub use consultation::*;
pub use enums::*;
pub use medication::*;
pub use patient::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
