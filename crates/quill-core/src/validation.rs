//! Schema validation for untrusted post payloads.
//!
//! Both validators walk every known field and collect all violations
//! before returning, so a caller sees each bad field at once.
//! Unknown fields are ignored.

use serde_json::{Map, Value};
use thiserror::Error;

use quill_shared::FieldError;

use crate::domain::{NewPost, PostPatch};

pub const TITLE_MAX_CHARS: usize = 100;
pub const CONTENT_MAX_CHARS: usize = 2000;

/// A payload that failed validation, with one entry per violated field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} invalid field(s)", .violations.len())]
pub struct ValidationError {
    violations: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldError>) -> Self {
        Self { violations }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    pub fn violations(&self) -> &[FieldError] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldError> {
        self.violations
    }
}

struct TextRule {
    field: &'static str,
    label: &'static str,
    max: usize,
}

const TITLE: TextRule = TextRule {
    field: "title",
    label: "Title",
    max: TITLE_MAX_CHARS,
};

const CONTENT: TextRule = TextRule {
    field: "content",
    label: "Content",
    max: CONTENT_MAX_CHARS,
};

const PUBLISHED: &str = "published";

/// Validate a create payload. `title` and `content` are required,
/// `published` defaults to `false`.
pub fn validate_create(raw: &Value) -> Result<NewPost, ValidationError> {
    let fields = as_object(raw)?;
    let mut violations = Vec::new();

    let title = check_text(fields, &TITLE, true, &mut violations);
    let content = check_text(fields, &CONTENT, true, &mut violations);
    let published = check_bool(fields, PUBLISHED, &mut violations);

    match (title, content) {
        (Some(title), Some(content)) if violations.is_empty() => Ok(NewPost {
            title,
            content,
            published: published.unwrap_or(false),
        }),
        _ => Err(ValidationError::new(violations)),
    }
}

/// Validate an update payload. Same per-field rules as create, but every
/// field is optional; an empty object is a valid no-op patch.
pub fn validate_update(raw: &Value) -> Result<PostPatch, ValidationError> {
    let fields = as_object(raw)?;
    let mut violations = Vec::new();

    let patch = PostPatch {
        title: check_text(fields, &TITLE, false, &mut violations),
        content: check_text(fields, &CONTENT, false, &mut violations),
        published: check_bool(fields, PUBLISHED, &mut violations),
    };

    if violations.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationError::new(violations))
    }
}

fn as_object(raw: &Value) -> Result<&Map<String, Value>, ValidationError> {
    raw.as_object().ok_or_else(|| {
        ValidationError::single("body", format!("Expected object, received {}", type_name(raw)))
    })
}

fn check_text(
    fields: &Map<String, Value>,
    rule: &TextRule,
    required: bool,
    violations: &mut Vec<FieldError>,
) -> Option<String> {
    let value = match fields.get(rule.field) {
        Some(value) => value,
        None => {
            if required {
                violations.push(FieldError::new(rule.field, "Required"));
            }
            return None;
        }
    };

    let Value::String(text) = value else {
        violations.push(FieldError::new(
            rule.field,
            format!("Expected string, received {}", type_name(value)),
        ));
        return None;
    };

    // Length is measured in characters, not bytes.
    let len = text.chars().count();
    if len == 0 {
        violations.push(FieldError::new(
            rule.field,
            format!("{} is required", rule.label),
        ));
        None
    } else if len > rule.max {
        violations.push(FieldError::new(
            rule.field,
            format!("{} must be at most {} characters", rule.label, rule.max),
        ));
        None
    } else {
        Some(text.clone())
    }
}

fn check_bool(
    fields: &Map<String, Value>,
    field: &'static str,
    violations: &mut Vec<FieldError>,
) -> Option<bool> {
    match fields.get(field)? {
        Value::Bool(flag) => Some(*flag),
        other => {
            violations.push(FieldError::new(
                field,
                format!("Expected boolean, received {}", type_name(other)),
            ));
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
