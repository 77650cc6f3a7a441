use std::fmt;

use garde::Validate;

use crate::db::models::UserPayload;

/// One violated field/rule pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Every rule a payload broke. Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl From<garde::Report> for Violations {
    fn from(report: garde::Report) -> Self {
        let violations = report
            .iter()
            .map(|(path, error)| {
                let field = path.to_string();
                Violation {
                    field: if field.is_empty() { "value".to_string() } else { field },
                    message: error.message().to_string(),
                }
            })
            .collect();
        Self(violations)
    }
}

/// Check name, email and age independently and collect every violation.
pub fn validate(payload: &UserPayload) -> Result<(), Violations> {
    payload.validate().map_err(Violations::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, age: i32) -> UserPayload {
        UserPayload {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[test]
    fn accepts_valid_user() {
        assert!(validate(&payload("John Doe", "johndoe@example.com", 30)).is_ok());
        assert!(validate(&payload("Jo", "a@example.com", 0)).is_ok());
        assert!(validate(&payload(&"x".repeat(100), "a@example.com", 130)).is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let err = validate(&payload("J", "not-an-email", 200)).unwrap_err();
        assert_eq!(err.count(), 3);
        assert!(err.has_field("name"));
        assert!(err.has_field("email"));
        assert!(err.has_field("age"));
    }

    #[test]
    fn zero_valued_payload_is_rejected() {
        let err = validate(&UserPayload::default()).unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("email"));
        assert!(!err.has_field("age"));
    }

    #[test]
    fn bounds_are_inclusive() {
        let err = validate(&payload(&"x".repeat(101), "a@example.com", -1)).unwrap_err();
        assert_eq!(err.count(), 2);
        assert!(err.has_field("name"));
        assert!(err.has_field("age"));
    }

    #[test]
    fn name_length_counts_characters() {
        assert!(validate(&payload("Żó", "a@example.com", 1)).is_ok());
    }

    #[test]
    fn display_lists_field_and_rule() {
        let err = validate(&payload("John", "nope", 30)).unwrap_err();
        assert!(err.to_string().starts_with("email: "));
    }
}
