//! Contact form shown on the result screen.

use std::fmt;

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Validated, trimmed contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Per-field validation flags; `true` marks the field as invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactFormErrors {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
}

impl ContactFormErrors {
    pub fn is_empty(&self) -> bool {
        !(self.name || self.email || self.phone)
    }

    /// Names of the invalid fields, in form order.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        [("name", self.name), ("email", self.email), ("phone", self.phone)]
            .into_iter()
            .filter_map(|(field, invalid)| invalid.then_some(field))
            .collect()
    }
}

impl fmt::Display for ContactFormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid contact fields: {}", self.invalid_fields().join(", "))
    }
}

impl std::error::Error for ContactFormErrors {}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Checks all three fields at once so every invalid one is reported.
    pub fn validate(&self) -> Result<ContactDetails, ContactFormErrors> {
        let errors = ContactFormErrors {
            name: self.name.trim().is_empty(),
            email: !looks_like_email(self.email.trim()),
            phone: self.phone.trim().is_empty(),
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ContactDetails {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        })
    }
}

/// Loose `local@domain.tld` check: some `x@y.z` run with no whitespace.
fn looks_like_email(email: &str) -> bool {
    email.char_indices().any(|(at, c)| {
        if c != '@' {
            return false;
        }
        let local_ok = email[..at]
            .chars()
            .next_back()
            .map(|prev| !prev.is_whitespace())
            .unwrap_or(false);
        let domain: String = email[at + 1..]
            .chars()
            .take_while(|ch| !ch.is_whitespace())
            .collect();
        let chars: Vec<char> = domain.chars().collect();
        let dot_ok = chars
            .iter()
            .enumerate()
            .any(|(i, ch)| *ch == '.' && i > 0 && i + 1 < chars.len());
        local_ok && dot_ok
    })
}
