// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential storage backends.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use cli_auth_paths::{PathResolver, PlatformDirs};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::CredentialError;
use crate::validate::validate_document;
use crate::value::{Credentials, PersistedCredentials};

/// Read/overwrite access to a single credentials document.
pub trait CredentialsRepository: Send + Sync + std::fmt::Debug {
	/// Read and validate the stored document.
	fn get(&self) -> Result<Credentials, CredentialError>;

	/// Replace the stored document with exactly `creds`.
	///
	/// Does nothing when `creds.skip_write` is `Some(true)`. The document is
	/// not validated on the way out.
	fn update(&self, creds: &Credentials) -> Result<(), CredentialError>;

	/// Where the document lives.
	fn config_path(&self) -> &Path;

	/// Whether a document is stored, valid or not.
	fn is_present(&self) -> Result<bool, CredentialError> {
		match self.get() {
			Ok(_) => Ok(true),
			Err(e) if e.is_not_found() => Ok(false),
			Err(e) if e.is_invalid_document() => Ok(true),
			Err(e) => Err(e),
		}
	}
}

/// `auth.json` on the local filesystem.
///
/// The path is resolved once at construction. Every [`get`](CredentialsRepository::get)
/// re-reads the file; writes go through a temporary sibling with mode 0600
/// that is renamed over the target.
#[derive(Debug, Clone)]
pub struct CredentialsStore {
	path: PathBuf,
}

impl CredentialsStore {
	/// Store for `tool_name`, resolved against the running platform.
	pub fn new(tool_name: &str) -> Self {
		Self::with_resolver(tool_name, &PathResolver::system())
	}

	pub fn with_resolver<D: PlatformDirs>(tool_name: &str, resolver: &PathResolver<D>) -> Self {
		let path = resolver.resolve_config_file(tool_name);
		debug!(tool = %tool_name, path = %path.display(), "credentials store opened");
		Self { path }
	}

	/// Store bound to an explicit file path, bypassing resolution.
	pub fn at_path(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	fn read_document(&self) -> Result<Value, CredentialError> {
		let bytes = match fs::read(&self.path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				return Err(CredentialError::NotFound {
					path: self.path.clone(),
				});
			}
			Err(e) => return Err(CredentialError::io(&self.path, e)),
		};

		serde_json::from_slice(&bytes).map_err(|source| CredentialError::Malformed {
			path: self.path.clone(),
			source,
		})
	}

	fn write_document(&self, creds: &Credentials) -> Result<(), CredentialError> {
		let mut contents = serde_json::to_string_pretty(&PersistedCredentials::from(creds))
			.map_err(|e| CredentialError::io(&self.path, io::Error::new(io::ErrorKind::InvalidData, e)))?;
		contents.push('\n');

		let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			Some(parent) => {
				fs::create_dir_all(parent).map_err(|e| CredentialError::io(parent, e))?;
				parent
			}
			None => Path::new("."),
		};

		// Each writer gets its own temp file, so concurrent updates race only
		// on the final rename and the last one wins.
		let mut temp = NamedTempFile::new_in(parent).map_err(|e| CredentialError::io(parent, e))?;
		write_private_file(temp.as_file_mut(), contents.as_bytes())
			.map_err(|e| CredentialError::io(temp.path(), e))?;

		temp.persist(&self.path).map_err(|e| {
			warn!(path = %e.file.path().display(), "discarding temporary credentials file");
			CredentialError::io(&self.path, e.error)
		})?;

		debug!(path = %self.path.display(), "credentials written");
		Ok(())
	}
}

/// Fill a freshly created temp file, readable and writable by the owner only.
fn write_private_file(file: &mut File, contents: &[u8]) -> io::Result<()> {
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		file.set_permissions(fs::Permissions::from_mode(0o600))?;
	}

	file.write_all(contents)?;
	file.sync_all()
}

impl CredentialsRepository for CredentialsStore {
	fn get(&self) -> Result<Credentials, CredentialError> {
		let document = self.read_document()?;

		validate_document(&document).map_err(|violations| {
			debug!(path = %self.path.display(), count = violations.len(), "credentials failed validation");
			CredentialError::SchemaViolation {
				path: self.path.clone(),
				violations,
			}
		})?;

		let persisted: PersistedCredentials =
			serde_json::from_value(document).map_err(|source| CredentialError::Malformed {
				path: self.path.clone(),
				source,
			})?;
		Ok(Credentials::from(persisted))
	}

	fn update(&self, creds: &Credentials) -> Result<(), CredentialError> {
		if creds.should_skip_write() {
			debug!(path = %self.path.display(), "skipWrite set, not persisting credentials");
			return Ok(());
		}
		self.write_document(creds)
	}

	fn config_path(&self) -> &Path {
		&self.path
	}
}

/// In-memory credentials for testing callers.
///
/// Applies the same skip and validation rules as [`CredentialsStore`].
#[derive(Debug)]
pub struct MemoryCredentialsStore {
	path: PathBuf,
	slot: RwLock<Option<Credentials>>,
}

impl Default for MemoryCredentialsStore {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryCredentialsStore {
	pub fn new() -> Self {
		Self {
			path: PathBuf::from("<memory>/auth.json"),
			slot: RwLock::new(None),
		}
	}

	/// Store that already holds `creds`.
	pub fn with_credentials(creds: Credentials) -> Self {
		let store = Self::new();
		*store.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(creds);
		store
	}
}

impl CredentialsRepository for MemoryCredentialsStore {
	fn get(&self) -> Result<Credentials, CredentialError> {
		let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
		let creds = slot.as_ref().ok_or_else(|| CredentialError::NotFound {
			path: self.path.clone(),
		})?;

		let document = serde_json::to_value(PersistedCredentials::from(creds)).map_err(|source| {
			CredentialError::Malformed {
				path: self.path.clone(),
				source,
			}
		})?;
		validate_document(&document).map_err(|violations| CredentialError::SchemaViolation {
			path: self.path.clone(),
			violations,
		})?;

		Ok(creds.clone())
	}

	fn update(&self, creds: &Credentials) -> Result<(), CredentialError> {
		if creds.should_skip_write() {
			return Ok(());
		}
		*self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(creds.clone());
		Ok(())
	}

	fn config_path(&self) -> &Path {
		&self.path
	}
}
