// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential error types.

use std::path::{Path, PathBuf};

use crate::validate::FieldViolation;

/// Errors returned by credential reads and writes.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
	/// The credentials file does not exist.
	#[error("credentials file not found: {}", .path.display())]
	NotFound { path: PathBuf },

	/// The file exists but is not JSON.
	#[error("credentials file {} is not valid JSON: {source}", .path.display())]
	Malformed {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	/// The file is JSON but not a credentials document.
	#[error(
		"credentials file {} is invalid: {}",
		.path.display(),
		join_violations(.violations)
	)]
	SchemaViolation {
		path: PathBuf,
		violations: Vec<FieldViolation>,
	},

	/// Reading, creating, or writing failed.
	#[error("I/O error on {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl CredentialError {
	pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
		Self::Io {
			path: path.to_path_buf(),
			source,
		}
	}

	/// The file this error refers to.
	pub fn path(&self) -> &Path {
		match self {
			Self::NotFound { path }
			| Self::Malformed { path, .. }
			| Self::SchemaViolation { path, .. }
			| Self::Io { path, .. } => path,
		}
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}

	/// True when the file is present but unusable (bad JSON or bad shape).
	///
	/// Callers typically treat this as "re-authenticate".
	pub fn is_invalid_document(&self) -> bool {
		matches!(self, Self::Malformed { .. } | Self::SchemaViolation { .. })
	}

	pub fn is_schema_violation(&self) -> bool {
		matches!(self, Self::SchemaViolation { .. })
	}

	/// Field-level violations, empty for every other kind.
	pub fn violations(&self) -> &[FieldViolation] {
		match self {
			Self::SchemaViolation { violations, .. } => violations,
			_ => &[],
		}
	}
}

fn join_violations(violations: &[FieldViolation]) -> String {
	violations
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn not_found_message_names_path() {
		let err = CredentialError::NotFound {
			path: PathBuf::from("/tmp/x/auth.json"),
		};
		assert_eq!(
			err.to_string(),
			"credentials file not found: /tmp/x/auth.json"
		);
		assert!(err.is_not_found());
		assert!(!err.is_invalid_document());
		assert!(err.violations().is_empty());
	}

	#[test]
	fn schema_violation_lists_every_field() {
		let err = CredentialError::SchemaViolation {
			path: PathBuf::from("auth.json"),
			violations: vec![
				FieldViolation::new("refreshToken", "non-empty string", "empty string"),
				FieldViolation::new("skipWrite", "boolean", "string"),
			],
		};
		let msg = err.to_string();

		assert!(msg.contains("refreshToken: expected non-empty string, found empty string"));
		assert!(msg.contains("skipWrite: expected boolean, found string"));
		assert!(err.is_schema_violation());
		assert!(err.is_invalid_document());
		assert_eq!(err.violations().len(), 2);
	}

	#[test]
	fn io_keeps_source() {
		let err = CredentialError::io(
			Path::new("/ro/auth.json"),
			std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
		);
		assert_eq!(err.path(), Path::new("/ro/auth.json"));
		assert!(std::error::Error::source(&err).is_some());
	}
}
