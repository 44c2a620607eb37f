//! Translation of `validator` failures into wire-level field violations.

use validator::{Validate, ValidationErrors};

use crate::response::FieldViolation;

/// Validate a request shape, reporting every violated rule.
pub fn check<T: Validate>(value: &T) -> Result<(), Vec<FieldViolation>> {
    value.validate().map_err(|errors| violations(&errors))
}

/// Flatten `ValidationErrors` into violations sorted by field then rule.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{field} is invalid"));
                FieldViolation::new(field.to_string(), e.code.to_string(), message)
            })
        })
        .collect();

    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}
