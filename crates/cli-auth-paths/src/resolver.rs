// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Candidate ordering and selection.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::platform::{PlatformDirs, SystemDirs};

/// Names that identify the predecessor tool's locations and the file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
	/// Dotfile directory under the home directory: `~/.now`.
	pub legacy_home_dir: String,
	/// Identifier whose platform data directories are checked last.
	pub legacy_app_name: String,
	/// Name of the credentials file inside the resolved directory.
	pub file_name: String,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			legacy_home_dir: ".now".to_string(),
			legacy_app_name: "now".to_string(),
			file_name: "auth.json".to_string(),
		}
	}
}

/// Where a candidate directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
	/// One of the tool's own platform data directories.
	Primary,
	/// The predecessor's dotfile directory in the user's home.
	LegacyHome,
	/// One of the predecessor's platform data directories.
	LegacyData,
}

impl fmt::Display for CandidateKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			CandidateKind::Primary => "primary",
			CandidateKind::LegacyHome => "legacy-home",
			CandidateKind::LegacyData => "legacy-data",
		})
	}
}

/// A directory considered for the credentials file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	pub path: PathBuf,
	pub kind: CandidateKind,
}

/// Returns whether `path` is a directory, without following symlinks.
///
/// Any metadata error counts as "not a directory".
pub fn is_directory(path: &Path) -> bool {
	match std::fs::symlink_metadata(path) {
		Ok(meta) => meta.is_dir(),
		Err(e) => {
			trace!(path = %path.display(), error = %e, "candidate not accessible");
			false
		}
	}
}

/// Chooses the directory holding the credentials file.
#[derive(Debug, Clone, Default)]
pub struct PathResolver<D = SystemDirs> {
	dirs: D,
	config: ResolverConfig,
}

impl PathResolver<SystemDirs> {
	/// Resolver over the running platform's directories.
	pub fn system() -> Self {
		Self::new(SystemDirs)
	}
}

impl<D: PlatformDirs> PathResolver<D> {
	pub fn new(dirs: D) -> Self {
		Self::with_config(dirs, ResolverConfig::default())
	}

	pub fn with_config(dirs: D, config: ResolverConfig) -> Self {
		Self { dirs, config }
	}

	pub fn config(&self) -> &ResolverConfig {
		&self.config
	}

	/// All candidate directories for `tool_name`, highest priority first.
	pub fn candidates(&self, tool_name: &str) -> Vec<Candidate> {
		let mut out: Vec<Candidate> = self
			.dirs
			.data_dirs(tool_name)
			.into_iter()
			.map(|path| Candidate {
				path,
				kind: CandidateKind::Primary,
			})
			.collect();

		if let Some(home) = self.dirs.home_dir() {
			out.push(Candidate {
				path: home.join(&self.config.legacy_home_dir),
				kind: CandidateKind::LegacyHome,
			});
		}

		out.extend(
			self
				.dirs
				.data_dirs(&self.config.legacy_app_name)
				.into_iter()
				.map(|path| Candidate {
					path,
					kind: CandidateKind::LegacyData,
				}),
		);

		out
	}

	/// The first existing candidate directory, or the tool's primary data
	/// directory when none exists. Never creates anything.
	pub fn resolve_config_dir(&self, tool_name: &str) -> PathBuf {
		let candidates = self.candidates(tool_name);

		for candidate in &candidates {
			let exists = is_directory(&candidate.path);
			trace!(
				path = %candidate.path.display(),
				kind = %candidate.kind,
				exists,
				"probed candidate"
			);
			if exists {
				debug!(
					tool = %tool_name,
					path = %candidate.path.display(),
					kind = %candidate.kind,
					"resolved existing config directory"
				);
				return candidate.path.clone();
			}
		}

		let fallback = candidates
			.into_iter()
			.find(|c| c.kind == CandidateKind::Primary)
			.map(|c| c.path)
			.unwrap_or_else(|| self.last_resort_dir(tool_name));

		debug!(
			tool = %tool_name,
			path = %fallback.display(),
			"no existing config directory, using default"
		);
		fallback
	}

	/// The credentials file path: the resolved directory joined with the
	/// configured file name.
	pub fn resolve_config_file(&self, tool_name: &str) -> PathBuf {
		self
			.resolve_config_dir(tool_name)
			.join(&self.config.file_name)
	}

	fn last_resort_dir(&self, tool_name: &str) -> PathBuf {
		match self.dirs.home_dir() {
			Some(home) => home.join(".local").join("share").join(tool_name),
			None => PathBuf::from(tool_name),
		}
	}
}
