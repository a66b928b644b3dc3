//! Presence checks for request payloads
//!
//! A field counts as present when it was sent and is not "falsy": text must
//! be non-empty and amounts must be non-zero. An amount of `0` is therefore
//! rejected the same way a missing amount is.

use crate::core::error::ApiError;

/// True when a text field was sent and is non-empty
pub fn is_present_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// True when an amount was sent and is non-zero
pub fn is_present_amount(value: Option<f64>) -> bool {
    value.is_some_and(|v| v != 0.0 && !v.is_nan())
}

/// Collects the names of required fields that failed the presence check
///
/// ```rust,ignore
/// let mut required = RequiredFields::default();
/// let comp_code = required.text("comp_code", body.comp_code);
/// let amt = required.amount("amt", body.amt);
/// match (comp_code, amt) {
///     (Some(comp_code), Some(amt)) => Ok(InvoiceDraft { comp_code, amt }),
///     _ => Err(required.into_error()),
/// }
/// ```
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// Check a text field, returning it only if present
    pub fn text(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        if is_present_text(value.as_deref()) {
            value
        } else {
            self.missing.push(field);
            None
        }
    }

    /// Check an amount field, returning it only if present
    pub fn amount(&mut self, field: &'static str, value: Option<f64>) -> Option<f64> {
        if is_present_amount(value) {
            value
        } else {
            self.missing.push(field);
            None
        }
    }

    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn into_error(self) -> ApiError {
        let verb = if self.missing.len() == 1 { "is" } else { "are" };
        ApiError::validation(format!("{} {} required", self.missing.join(" and "), verb))
    }
}
