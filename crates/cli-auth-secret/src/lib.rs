// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token wrapper that keeps credentials out of logs.
//!
//! [`SecretString`] holds an access or refresh token. It prints as
//! `[REDACTED]` through both `Debug` and `Display`, so passing it to a
//! `tracing` macro with `%` or `?` never leaks the value, and its buffer is
//! zeroed when dropped.
//!
//! ```
//! use cli_auth_secret::SecretString;
//!
//! let token = SecretString::new("vca_abc123");
//! assert_eq!(format!("{token}"), "[REDACTED]");
//! assert_eq!(format!("{token:?}"), "SecretString(\"[REDACTED]\")");
//! assert_eq!(token.expose(), "vca_abc123");
//! ```

use std::fmt;

use zeroize::Zeroize;

/// Placeholder printed in place of a secret.
pub const REDACTED: &str = "[REDACTED]";

/// A token string that never formats its contents.
///
/// There is no `Deref` to `str`; reading the value requires [`expose`](Self::expose),
/// which keeps every access visible at the call site.
#[derive(Clone, Default, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			inner: value.into(),
		}
	}

	/// Borrow the underlying token.
	pub fn expose(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Copy the token out. The wrapper's own buffer is still zeroed on drop.
	pub fn into_inner(self) -> String {
		self.inner.clone()
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretString").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}
