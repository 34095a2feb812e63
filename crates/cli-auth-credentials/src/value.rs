// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential value types.

use std::time::{SystemTime, UNIX_EPOCH};

use cli_auth_secret::SecretString;
use serde::{Deserialize, Serialize, Serializer};

/// On-disk form of `auth.json`.
///
/// Absent fields are omitted on write. Key names match the file format,
/// including the two `// ...` annotation keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistedCredentials {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,

	#[serde(
		skip_serializing_if = "Option::is_none",
		serialize_with = "serialize_epoch_seconds"
	)]
	pub expires_at: Option<f64>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub skip_write: Option<bool>,

	#[serde(rename = "// Note", skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,

	#[serde(rename = "// Docs", skip_serializing_if = "Option::is_none")]
	pub docs: Option<String>,
}

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Writes whole-second timestamps as JSON integers.
fn serialize_epoch_seconds<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match value {
		Some(secs) if secs.fract() == 0.0 && secs.abs() <= MAX_SAFE_INTEGER => {
			serializer.serialize_i64(*secs as i64)
		}
		Some(secs) => serializer.serialize_f64(*secs),
		None => serializer.serialize_none(),
	}
}

/// Runtime credentials with tokens wrapped in [`SecretString`].
///
/// `Debug` output is safe to log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
	/// Access token from the OAuth device authorization flow.
	pub token: Option<SecretString>,
	/// Refresh token from the same flow. Never empty when present.
	pub refresh_token: Option<SecretString>,
	/// When `token` expires, in seconds since the Unix epoch.
	pub expires_at: Option<f64>,
	/// When `Some(true)`, `update` returns without writing.
	pub skip_write: Option<bool>,
	pub note: Option<String>,
	pub docs: Option<String>,
}

impl Credentials {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_token(mut self, token: impl Into<SecretString>) -> Self {
		self.token = Some(token.into());
		self
	}

	pub fn with_refresh_token(mut self, refresh_token: impl Into<SecretString>) -> Self {
		self.refresh_token = Some(refresh_token.into());
		self
	}

	pub fn with_expires_at(mut self, epoch_secs: f64) -> Self {
		self.expires_at = Some(epoch_secs);
		self
	}

	/// Mark these credentials as not to be persisted by `update`.
	pub fn skipping_write(mut self) -> Self {
		self.skip_write = Some(true);
		self
	}

	pub fn should_skip_write(&self) -> bool {
		self.skip_write == Some(true)
	}

	/// Whether the access token had expired at `now_secs`.
	///
	/// Credentials without an expiry never report as expired.
	pub fn is_expired_at(&self, now_secs: f64) -> bool {
		self.expires_at.is_some_and(|at| at <= now_secs)
	}

	/// [`is_expired_at`](Self::is_expired_at) against the system clock.
	pub fn is_expired(&self) -> bool {
		let now = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_secs_f64())
			.unwrap_or(0.0);
		self.is_expired_at(now)
	}

	/// Overlay every field that is set in `patch`.
	///
	/// `update` replaces the whole file, so partial updates read the current
	/// document, merge, and write the result.
	pub fn merge(&mut self, patch: Credentials) {
		let Credentials {
			token,
			refresh_token,
			expires_at,
			skip_write,
			note,
			docs,
		} = patch;

		if token.is_some() {
			self.token = token;
		}
		if refresh_token.is_some() {
			self.refresh_token = refresh_token;
		}
		if expires_at.is_some() {
			self.expires_at = expires_at;
		}
		if skip_write.is_some() {
			self.skip_write = skip_write;
		}
		if note.is_some() {
			self.note = note;
		}
		if docs.is_some() {
			self.docs = docs;
		}
	}
}

impl From<PersistedCredentials> for Credentials {
	fn from(persisted: PersistedCredentials) -> Self {
		Self {
			token: persisted.token.map(SecretString::new),
			refresh_token: persisted.refresh_token.map(SecretString::new),
			expires_at: persisted.expires_at,
			skip_write: persisted.skip_write,
			note: persisted.note,
			docs: persisted.docs,
		}
	}
}

impl From<&Credentials> for PersistedCredentials {
	fn from(creds: &Credentials) -> Self {
		Self {
			token: creds.token.as_ref().map(|t| t.expose().to_string()),
			refresh_token: creds.refresh_token.as_ref().map(|t| t.expose().to_string()),
			expires_at: creds.expires_at,
			skip_write: creds.skip_write,
			note: creds.note.clone(),
			docs: creds.docs.clone(),
		}
	}
}
