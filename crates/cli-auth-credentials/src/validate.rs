// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shape validation for the credentials document.
//!
//! The document is a flat JSON object. Every key is optional, but a key that
//! is present must hold a value of its declared type; `null` is not accepted
//! in place of an absent key. Keys outside the known set are rejected.

use std::fmt;

use serde_json::Value;

pub(crate) const TOKEN: &str = "token";
pub(crate) const REFRESH_TOKEN: &str = "refreshToken";
pub(crate) const EXPIRES_AT: &str = "expiresAt";
pub(crate) const SKIP_WRITE: &str = "skipWrite";
pub(crate) const NOTE: &str = "// Note";
pub(crate) const DOCS: &str = "// Docs";

const KNOWN_FIELDS: [&str; 6] = [TOKEN, REFRESH_TOKEN, EXPIRES_AT, SKIP_WRITE, NOTE, DOCS];

/// Name used for the document itself when the root is not an object.
pub const ROOT_FIELD: &str = "$";

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
	/// JSON key of the offending field, or [`ROOT_FIELD`].
	pub field: String,
	pub expected: String,
	pub actual: String,
}

impl FieldViolation {
	pub fn new(
		field: impl Into<String>,
		expected: impl Into<String>,
		actual: impl Into<String>,
	) -> Self {
		Self {
			field: field.into(),
			expected: expected.into(),
			actual: actual.into(),
		}
	}
}

impl fmt::Display for FieldViolation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: expected {}, found {}",
			self.field, self.expected, self.actual
		)
	}
}

#[derive(Clone, Copy)]
enum Kind {
	String,
	NonEmptyString,
	Number,
	Boolean,
}

impl Kind {
	fn for_field(field: &str) -> Option<Kind> {
		match field {
			TOKEN | NOTE | DOCS => Some(Kind::String),
			REFRESH_TOKEN => Some(Kind::NonEmptyString),
			EXPIRES_AT => Some(Kind::Number),
			SKIP_WRITE => Some(Kind::Boolean),
			_ => None,
		}
	}

	fn expected(self) -> &'static str {
		match self {
			Kind::String => "string",
			Kind::NonEmptyString => "non-empty string",
			Kind::Number => "number",
			Kind::Boolean => "boolean",
		}
	}

	fn accepts(self, value: &Value) -> bool {
		match (self, value) {
			(Kind::String, Value::String(_)) => true,
			(Kind::NonEmptyString, Value::String(s)) => !s.is_empty(),
			(Kind::Number, Value::Number(_)) => true,
			(Kind::Boolean, Value::Bool(_)) => true,
			_ => false,
		}
	}
}

/// Describes a JSON value for violation messages.
fn describe(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(s) if s.is_empty() => "empty string",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Check `value` against the credentials shape.
///
/// Returns every violation found, ordered by field name.
pub fn validate_document(value: &Value) -> Result<(), Vec<FieldViolation>> {
	let Value::Object(map) = value else {
		return Err(vec![FieldViolation::new(
			ROOT_FIELD,
			"object",
			describe(value),
		)]);
	};

	let mut violations = Vec::new();
	for (field, value) in map {
		match Kind::for_field(field) {
			Some(kind) if kind.accepts(value) => {}
			Some(kind) => {
				violations.push(FieldViolation::new(field, kind.expected(), describe(value)));
			}
			None => {
				violations.push(FieldViolation::new(
					field,
					format!("one of {}", KNOWN_FIELDS.join(", ")),
					"unknown field",
				));
			}
		}
	}

	if violations.is_empty() {
		Ok(())
	} else {
		Err(violations)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn empty_object_is_valid() {
		assert!(validate_document(&json!({})).is_ok());
	}

	#[test]
	fn full_document_is_valid() {
		let doc = json!({
			"token": "at",
			"refreshToken": "rt",
			"expiresAt": 1735500000,
			"skipWrite": false,
			"// Note": "This is your Vercel credentials file. DO NOT SHARE!",
			"// Docs": "https://vercel.com/docs/projects/project-configuration/global-configuration#auth.json"
		});
		assert!(validate_document(&doc).is_ok());
	}

	#[test]
	fn fractional_expiry_is_a_number() {
		assert!(validate_document(&json!({ "expiresAt": 1.5 })).is_ok());
	}

	#[test]
	fn empty_token_is_allowed() {
		assert!(validate_document(&json!({ "token": "" })).is_ok());
	}

	#[test]
	fn empty_refresh_token_is_rejected() {
		let violations = validate_document(&json!({ "refreshToken": "" })).unwrap_err();
		assert_eq!(
			violations,
			vec![FieldViolation::new(
				"refreshToken",
				"non-empty string",
				"empty string"
			)]
		);
	}

	#[test]
	fn unknown_field_is_rejected() {
		let violations = validate_document(&json!({ "token": "t", "user": "me" })).unwrap_err();
		assert_eq!(violations.len(), 1);
		assert_eq!(violations[0].field, "user");
		assert_eq!(violations[0].actual, "unknown field");
		assert!(violations[0].expected.contains("refreshToken"));
	}

	#[test]
	fn null_is_not_absent() {
		let violations = validate_document(&json!({ "token": null })).unwrap_err();
		assert_eq!(violations, vec![FieldViolation::new("token", "string", "null")]);
	}

	#[test]
	fn wrong_types_are_all_reported() {
		let doc = json!({
			"token": 1,
			"expiresAt": "soon",
			"skipWrite": "yes",
			"// Note": ["a"]
		});
		let violations = validate_document(&doc).unwrap_err();
		let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();

		assert_eq!(fields, vec!["// Note", "expiresAt", "skipWrite", "token"]);
		assert_eq!(violations[1].expected, "number");
		assert_eq!(violations[1].actual, "string");
	}

	#[test]
	fn non_object_root_is_rejected() {
		for (doc, actual) in [
			(json!([]), "array"),
			(json!("token"), "string"),
			(json!(null), "null"),
			(json!(42), "number"),
		] {
			let violations = validate_document(&doc).unwrap_err();
			assert_eq!(violations, vec![FieldViolation::new(ROOT_FIELD, "object", actual)]);
		}
	}

	#[test]
	fn nested_annotation_object_is_rejected() {
		let violations = validate_document(&json!({ "// Docs": { "url": "x" } })).unwrap_err();
		assert_eq!(violations[0].actual, "object");
	}

	proptest! {
		#[test]
		fn non_empty_refresh_tokens_pass(token in ".+") {
			let doc = json!({ "refreshToken": token });
			prop_assert!(validate_document(&doc).is_ok());
		}

		#[test]
		fn unknown_keys_fail(key in "[a-zA-Z]{1,16}") {
			prop_assume!(!KNOWN_FIELDS.contains(&key.as_str()));
			let mut map = serde_json::Map::new();
			map.insert(key.clone(), json!("v"));
			let violations = validate_document(&Value::Object(map)).unwrap_err();
			prop_assert_eq!(&violations[0].field, &key);
		}
	}
}
