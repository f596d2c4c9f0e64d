use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Domestic mobile numbering: 10 digits, first digit 6-9.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").unwrap());

// Roll numbers look like 23CSE0142: admission year, branch code, serial.
static ROLL_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}[A-Za-z]{2,4}[0-9]{3,5}$").unwrap());

/// Profile fields collected by the registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registrant {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub roll_no: String,
}

/// Validation failures keyed by field name, for direct form binding.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Checks the shape of a registrant's personal data. Pure; no network or
/// storage access.
pub fn validate_registrant(reg: &Registrant) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if reg.name.trim().is_empty() {
        errors.insert("name", "Name is required".to_string());
    }
    if !EMAIL_RE.is_match(reg.email.trim()) {
        errors.insert("email", "Enter a valid email address".to_string());
    }
    if !PHONE_RE.is_match(reg.phone.trim()) {
        errors.insert("phone", "Enter a valid 10-digit mobile number".to_string());
    }
    if !ROLL_NO_RE.is_match(reg.roll_no.trim()) {
        errors.insert("roll_no", "Enter a valid roll number".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
