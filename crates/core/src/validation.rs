//! Field-level validation helpers built on `validator`.
//!
//! DTOs derive [`Validate`]; handlers call [`validate_dto`] before any
//! business logic so malformed payloads never reach the database.

use serde::Serialize;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// A single field-level rule violation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Flatten `validator` errors into a field-sorted violation list.
///
/// Nested struct and list errors are reported with dotted/indexed paths,
/// e.g. `unlimited_prices[1].month`.
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    collect_violations("", errors, &mut violations);
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

fn collect_violations(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|err| FieldViolation {
                    field: path.clone(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_violations(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_violations(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

/// Render violations as `field: message; field: message`.
pub fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run derive-based validation and convert failures to [`CoreError::InvalidInput`].
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), CoreError> {
    dto.validate()
        .map_err(|e| CoreError::InvalidInput(describe(&field_violations(&e))))
}

/// Reject a partial update that carries no fields at all.
pub fn ensure_non_empty_patch(is_empty: bool) -> Result<(), CoreError> {
    if is_empty {
        return Err(CoreError::InvalidInput(
            "Update payload must contain at least one field".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(email(message = "must be a valid email"))]
        email: String,
        #[validate(range(min = 1))]
        count: i32,
    }

    #[test]
    fn valid_dto_passes() {
        let dto = Sample {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            count: 3,
        };
        assert!(validate_dto(&dto).is_ok());
    }

    #[test]
    fn violations_are_sorted_by_field() {
        let dto = Sample {
            name: String::new(),
            email: "nope".into(),
            count: 0,
        };
        let errors = dto.validate().unwrap_err();
        let violations = field_violations(&errors);
        let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["count", "email", "name"]);
        assert_eq!(violations[2].message, "must not be empty");
        // No custom message falls back to the rule code.
        assert_eq!(violations[0].message, "range");
    }

    #[test]
    fn invalid_dto_maps_to_invalid_input() {
        let dto = Sample {
            name: "Ada".into(),
            email: "broken".into(),
            count: 1,
        };
        let err = validate_dto(&dto).unwrap_err();
        assert_matches!(err, CoreError::InvalidInput(msg) if msg == "email: must be a valid email");
    }

    #[derive(Validate)]
    struct Parent {
        #[validate(nested)]
        items: Vec<Sample>,
    }

    #[test]
    fn nested_list_errors_carry_their_index() {
        let dto = Parent {
            items: vec![
                Sample {
                    name: "ok".into(),
                    email: "ok@example.com".into(),
                    count: 1,
                },
                Sample {
                    name: String::new(),
                    email: "ok@example.com".into(),
                    count: 1,
                },
            ],
        };
        let violations = field_violations(&dto.validate().unwrap_err());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "items[1].name");
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert_matches!(ensure_non_empty_patch(true), Err(CoreError::InvalidInput(_)));
        assert!(ensure_non_empty_patch(false).is_ok());
    }
}
