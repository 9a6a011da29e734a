//! Request-shape checks for user payloads.
//!
//! Presence and type are read off the raw JSON; the content rules (non-empty,
//! email) are declared on `UserFields` with `validator`. Fields are checked in
//! schema order and the first violation wins, so callers always get one
//! message describing the earliest problem.

use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::UserFields;
use crate::utils::AppError;

/// Rule codes in the order they are reported when a field breaks several.
const RULE_ORDER: [&str; 3] = ["length", "email", "email_domain"];

/// Immutable user schema, built once at startup and shared by all workers.
#[derive(Debug, Clone)]
pub struct UserSchema {
    fields: [&'static str; 4],
}

impl Default for UserSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl UserSchema {
    pub fn new() -> Self {
        Self {
            fields: ["first_name", "last_name", "email", "phone"],
        }
    }

    /// Checks `candidate` and returns its typed fields, or the first
    /// violated rule as `AppError::Validation`.
    pub fn validate(&self, candidate: &Value) -> Result<UserFields, AppError> {
        match self.check(candidate) {
            Ok(fields) => {
                log::debug!("✅ User payload passed validation");
                Ok(fields)
            }
            Err(message) => {
                log::warn!("⚠️ User payload rejected: {}", message);
                Err(AppError::Validation(message))
            }
        }
    }

    fn check(&self, candidate: &Value) -> Result<UserFields, String> {
        let object = candidate
            .as_object()
            .ok_or_else(|| "\"value\" must be of type object".to_string())?;

        let text = |name: &str| {
            object
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let fields = UserFields {
            first_name: text("first_name"),
            last_name: text("last_name"),
            email: text("email"),
            phone: text("phone"),
        };
        let rule_errors = fields.validate().err();

        for name in self.fields {
            check_present_string(object, name)?;
            if let Some(message) = rule_errors
                .as_ref()
                .and_then(|errors| first_message(errors, name))
            {
                return Err(message);
            }
        }

        if let Some(unknown) = object
            .keys()
            .find(|key| !self.fields.iter().any(|f| *f == key.as_str()))
        {
            return Err(format!("\"{}\" is not allowed", unknown));
        }

        Ok(fields)
    }
}

/// `null` is a present value of the wrong type, not a missing one.
fn check_present_string(object: &Map<String, Value>, name: &str) -> Result<(), String> {
    match object.get(name) {
        None => Err(format!("\"{}\" is required", name)),
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(format!("\"{}\" must be a string", name)),
    }
}

fn first_message(errors: &ValidationErrors, name: &str) -> Option<String> {
    let field_errors = errors.field_errors();
    let list = field_errors.get(name)?;

    RULE_ORDER
        .iter()
        .find_map(|code| list.iter().find(|e| e.code == *code))
        .or_else(|| list.first())
        .map(|e| match &e.message {
            Some(message) => message.to_string(),
            None => format!("\"{}\" is invalid", name),
        })
}

/// Requires a dotted domain after the `@` (`a@b` alone is rejected).
///
/// TLDs are not checked against the IANA list: `a@b.notatld` passes.
pub fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let dotted = match email.rsplit_once('@') {
        Some((_, domain)) => {
            let labels: Vec<&str> = domain.split('.').collect();
            labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
        }
        None => false,
    };

    if dotted {
        Ok(())
    } else {
        let mut error = ValidationError::new("email_domain");
        error.message = Some("\"email\" must be a valid email".into());
        Err(error)
    }
}
