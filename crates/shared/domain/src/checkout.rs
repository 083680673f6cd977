//! Checkout form rule shared by the browser guard and the server handler.
//!
//! A checkout may proceed if and only if both the name and the address are
//! non-empty after trimming leading and trailing whitespace. Whitespace follows the
//! browser's `String.prototype.trim`, so both sides agree on every input.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Set of required checkout fields that were left empty.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RequiredField: u8 {
        const NAME = 1 << 0;
        const ADDRESS = 1 << 1;
    }
}

impl RequiredField {
    /// Form field names of the flags in this set, in form order.
    pub fn field_names(self) -> impl Iterator<Item = &'static str> {
        self.iter().map(|flag| if flag == Self::NAME { "name" } else { "address" })
    }
}

/// Whitespace as browsers trim it: the `Zs` space separators, the line terminators
/// and TAB, VT, FF and the byte order mark. U+0085 (NEL) is not whitespace here.
#[must_use]
pub const fn is_form_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\u{B}' | '\u{C}' | '\r'
            | ' ' | '\u{A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

/// `value` without leading and trailing [form whitespace](is_form_whitespace).
#[must_use]
pub fn trim_form_value(value: &str) -> &str {
    value.trim_matches(is_form_whitespace)
}

/// Raw values as posted by the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Shipping details that passed validation. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    pub name: String,
    pub address: String,
}

/// At least one required field trimmed to empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingRequiredField {
    pub fields: RequiredField,
}

impl fmt::Display for MissingRequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.field_names().collect();
        write!(f, "missing required field(s): {}", names.join(", "))
    }
}

impl std::error::Error for MissingRequiredField {}

impl CheckoutForm {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: name.into(), address: address.into() }
    }

    /// Trims both fields and checks that neither is empty.
    ///
    /// # Errors
    /// Returns [`MissingRequiredField`] listing every empty field.
    pub fn validate(&self) -> Result<CheckoutDetails, MissingRequiredField> {
        let name = trim_form_value(&self.name);
        let address = trim_form_value(&self.address);

        let mut missing = RequiredField::empty();
        if name.is_empty() {
            missing |= RequiredField::NAME;
        }
        if address.is_empty() {
            missing |= RequiredField::ADDRESS;
        }

        if missing.is_empty() {
            Ok(CheckoutDetails { name: name.to_owned(), address: address.to_owned() })
        } else {
            Err(MissingRequiredField { fields: missing })
        }
    }
}
