//! Submission checks for the booking wizard and the payment form.
//!
//! Checks run in a fixed order and the first failure is returned; the
//! caller shows that single message and drops the submission.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{
    domain::PaymentMethod,
    error::{UnknownProofPolicy, ValidationError},
    protocol::{GuestDetails, ProofFile, MAX_PROOF_BYTES},
};

pub const MIN_PHONE_LEN: usize = 10;

/// Which payment methods must come with an uploaded proof of payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofPolicy {
    /// The page has no upload input.
    NotCollected,
    /// QRIS payments are confirmed by the gateway, every other method needs proof.
    ExemptQris,
    #[default]
    AllMethods,
}

impl ProofPolicy {
    pub fn requires_proof(self, method: &PaymentMethod) -> bool {
        match self {
            ProofPolicy::NotCollected => false,
            ProofPolicy::ExemptQris => !method.is_qris(),
            ProofPolicy::AllMethods => true,
        }
    }
}

impl FromStr for ProofPolicy {
    type Err = UnknownProofPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_collected" | "none" => Ok(ProofPolicy::NotCollected),
            "exempt_qris" => Ok(ProofPolicy::ExemptQris),
            "all_methods" | "all" => Ok(ProofPolicy::AllMethods),
            other => Err(UnknownProofPolicy(other.to_string())),
        }
    }
}

/// Values gathered from the wizard at submit time.
#[derive(Debug, Clone, Copy)]
pub struct BookingSubmission<'a> {
    pub details: &'a GuestDetails,
    pub payment_method: &'a PaymentMethod,
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedStay {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

pub fn validate_booking(
    submission: BookingSubmission<'_>,
    policy: ProofPolicy,
) -> Result<ValidatedStay, ValidationError> {
    let details = submission.details;

    if !details.terms_accepted {
        return Err(ValidationError::TermsNotAccepted);
    }
    if submission.payment_method.is_empty() {
        return Err(ValidationError::MissingPaymentMethod);
    }

    let required = [
        ("firstName", details.first_name.as_str()),
        ("lastName", details.last_name.as_str()),
        ("email", details.email.as_str()),
        ("phone", details.phone.as_str()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingRequiredField { field: *field });
    }
    let Some(checkin) = submission.checkin else {
        return Err(ValidationError::MissingRequiredField {
            field: "final-checkin",
        });
    };
    let Some(checkout) = submission.checkout else {
        return Err(ValidationError::MissingRequiredField {
            field: "final-checkout",
        });
    };

    if !is_valid_email(&details.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if details.phone.chars().count() < MIN_PHONE_LEN {
        return Err(ValidationError::InvalidPhone);
    }
    if checkin >= checkout {
        return Err(ValidationError::DateOrder);
    }

    validate_payment_proof(
        submission.payment_method,
        details.payment_proof.as_ref(),
        policy,
    )?;

    Ok(ValidatedStay { checkin, checkout })
}

/// Client-side pre-check of the uploaded proof of payment.
pub fn validate_payment_proof(
    method: &PaymentMethod,
    proof: Option<&ProofFile>,
    policy: ProofPolicy,
) -> Result<(), ValidationError> {
    if !policy.requires_proof(method) {
        return Ok(());
    }

    let Some(proof) = proof else {
        return Err(ValidationError::MissingProof {
            method: method.display_label(),
        });
    };
    if !proof.has_accepted_type() {
        return Err(ValidationError::UnsupportedProofType {
            mime_type: proof.mime_type.clone(),
        });
    }
    if proof.size_bytes > MAX_PROOF_BYTES {
        return Err(ValidationError::ProofTooLarge {
            size_bytes: proof.size_bytes,
        });
    }

    Ok(())
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, ch)| ch == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
