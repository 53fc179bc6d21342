use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown room type '{0}'")]
pub struct UnknownRoom(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown proof policy '{0}'")]
pub struct UnknownProofPolicy(pub String);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("wizard step {0} is out of range (expected 1-3)")]
pub struct StepOutOfRange(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    TermsNotAccepted,
    MissingPaymentMethod,
    MissingRequiredField,
    InvalidEmail,
    InvalidPhone,
    DateOrder,
    MissingProof,
    UnsupportedProofType,
    ProofTooLarge,
}

/// A rejected booking or payment submission. `Display` is the message shown
/// to the guest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,
    #[error("Please select a payment method")]
    MissingPaymentMethod,
    #[error("Please fill in all required fields")]
    MissingRequiredField { field: &'static str },
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("Check-out date must be after check-in date")]
    DateOrder,
    #[error("Please upload payment proof for {method} payment.")]
    MissingProof { method: String },
    #[error("Please upload a JPG, PNG, or PDF file.")]
    UnsupportedProofType { mime_type: String },
    #[error("File size must be less than 5MB.")]
    ProofTooLarge { size_bytes: u64 },
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::TermsNotAccepted => ErrorCode::TermsNotAccepted,
            ValidationError::MissingPaymentMethod => ErrorCode::MissingPaymentMethod,
            ValidationError::MissingRequiredField { .. } => ErrorCode::MissingRequiredField,
            ValidationError::InvalidEmail => ErrorCode::InvalidEmail,
            ValidationError::InvalidPhone => ErrorCode::InvalidPhone,
            ValidationError::DateOrder => ErrorCode::DateOrder,
            ValidationError::MissingProof { .. } => ErrorCode::MissingProof,
            ValidationError::UnsupportedProofType { .. } => ErrorCode::UnsupportedProofType,
            ValidationError::ProofTooLarge { .. } => ErrorCode::ProofTooLarge,
        }
    }

    /// Element id that should receive focus after the alert, if any.
    pub fn focus_target(&self) -> Option<&'static str> {
        match self {
            ValidationError::TermsNotAccepted => Some("final-terms"),
            ValidationError::InvalidEmail => Some("email"),
            ValidationError::InvalidPhone => Some("phone"),
            _ => None,
        }
    }
}
