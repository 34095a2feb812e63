// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Human-readable output for the `status` and `candidates` commands.

use std::fmt::Write;
use std::path::Path;

use cli_auth_credentials::{CredentialError, Credentials};
use cli_auth_paths::Candidate;

/// Outcome of `status`: the text to print and whether the user is logged in.
#[derive(Debug, PartialEq, Eq)]
pub struct StatusReport {
	pub text: String,
	pub logged_in: bool,
}

pub fn status_report(
	path: &Path,
	result: &Result<Credentials, CredentialError>,
	now_secs: f64,
) -> StatusReport {
	let mut text = String::new();
	let _ = writeln!(text, "credentials: {}", path.display());

	let creds = match result {
		Ok(creds) => creds,
		Err(e) if e.is_not_found() => {
			let _ = writeln!(text, "status: not logged in");
			return StatusReport {
				text,
				logged_in: false,
			};
		}
		Err(e) => {
			let _ = writeln!(text, "status: unusable credentials file");
			for violation in e.violations() {
				let _ = writeln!(text, "  {violation}");
			}
			if e.violations().is_empty() {
				let _ = writeln!(text, "  {e}");
			}
			return StatusReport {
				text,
				logged_in: false,
			};
		}
	};

	let has_token = creds.token.as_ref().is_some_and(|t| !t.is_empty());
	let _ = writeln!(
		text,
		"status: {}",
		if has_token { "logged in" } else { "no access token" }
	);
	let _ = writeln!(text, "access token: {}", present(has_token));
	let _ = writeln!(
		text,
		"refresh token: {}",
		present(creds.refresh_token.is_some())
	);

	match creds.expires_at {
		None => {
			let _ = writeln!(text, "expires: never recorded");
		}
		Some(at) if creds.is_expired_at(now_secs) => {
			let _ = writeln!(text, "expires: expired {}s ago", (now_secs - at).round() as i64);
		}
		Some(at) => {
			let _ = writeln!(text, "expires: in {}s", (at - now_secs).round() as i64);
		}
	}

	StatusReport {
		text,
		logged_in: has_token,
	}
}

fn present(yes: bool) -> &'static str {
	if yes {
		"present"
	} else {
		"absent"
	}
}

/// One line per candidate: `*` marks the selected directory, `+` any other
/// that exists.
pub fn candidates_report(candidates: &[(Candidate, bool)], selected: &Path) -> String {
	let mut text = String::new();
	for (candidate, exists) in candidates {
		let marker = if candidate.path == selected {
			'*'
		} else if *exists {
			'+'
		} else {
			' '
		};
		let _ = writeln!(
			text,
			"{marker} {:<11} {}",
			candidate.kind.to_string(),
			candidate.path.display()
		);
	}
	text
}
