// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform directory conventions.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Source of the home directory and per-application data directories.
pub trait PlatformDirs: std::fmt::Debug {
	/// The user's home directory, if one can be determined.
	fn home_dir(&self) -> Option<PathBuf>;

	/// Data directories for `app`, highest priority first.
	///
	/// The first entry is the per-user directory a fresh install should
	/// create. Later entries are system-wide or legacy variants.
	fn data_dirs(&self, app: &str) -> Vec<PathBuf>;
}

/// XDG default for `XDG_DATA_DIRS` when the variable is unset or empty.
const DEFAULT_XDG_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// Directories reported by the running platform.
///
/// The per-user data directory comes from [`dirs::data_dir`]:
/// `$XDG_DATA_HOME` or `~/.local/share` on Linux,
/// `~/Library/Application Support` on macOS, `%APPDATA%` on Windows.
/// On other Unix systems the entries of `$XDG_DATA_DIRS` follow it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDirs;

impl PlatformDirs for SystemDirs {
	fn home_dir(&self) -> Option<PathBuf> {
		dirs::home_dir()
	}

	fn data_dirs(&self, app: &str) -> Vec<PathBuf> {
		let mut out = Vec::new();

		match dirs::data_dir() {
			Some(dir) => out.push(dir.join(app)),
			None => {
				if let Some(home) = dirs::home_dir() {
					out.push(home.join(".local").join("share").join(app));
				}
			}
		}

		#[cfg(all(unix, not(target_os = "macos")))]
		out.extend(
			xdg_data_dirs(std::env::var_os("XDG_DATA_DIRS"))
				.into_iter()
				.map(|dir| dir.join(app)),
		);

		out
	}
}

/// Parse an `XDG_DATA_DIRS` value.
///
/// Relative entries are ignored. An unset, empty, or all-relative value
/// yields the XDG default list.
pub fn xdg_data_dirs(value: Option<OsString>) -> Vec<PathBuf> {
	let parsed: Vec<PathBuf> = value
		.filter(|v| !v.is_empty())
		.map(|v| {
			std::env::split_paths(&v)
				.filter(|p| p.is_absolute())
				.collect()
		})
		.unwrap_or_default();

	if parsed.is_empty() {
		std::env::split_paths(DEFAULT_XDG_DATA_DIRS).collect()
	} else {
		parsed
	}
}

/// A fixed directory table.
///
/// Every app's data directories are its name joined onto each configured
/// root, unless an explicit list was registered for that app.
#[derive(Debug, Clone, Default)]
pub struct StaticDirs {
	home: Option<PathBuf>,
	data_roots: Vec<PathBuf>,
	overrides: HashMap<String, Vec<PathBuf>>,
}

impl StaticDirs {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
		self.home = Some(home.into());
		self
	}

	/// Append a data root. Roots keep the order they were added in.
	pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.data_roots.push(root.into());
		self
	}

	/// Register the exact data directories reported for `app`.
	pub fn with_app_dirs<I, P>(mut self, app: &str, dirs: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		self.overrides.insert(
			app.to_string(),
			dirs.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
		);
		self
	}
}

impl PlatformDirs for StaticDirs {
	fn home_dir(&self) -> Option<PathBuf> {
		self.home.clone()
	}

	fn data_dirs(&self, app: &str) -> Vec<PathBuf> {
		if let Some(dirs) = self.overrides.get(app) {
			return dirs.clone();
		}
		self.data_roots.iter().map(|root| root.join(app)).collect()
	}
}
