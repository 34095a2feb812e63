// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local credentials storage for a CLI's authentication state.
//!
//! The state (access token, refresh token, expiry) lives in a single
//! `auth.json` file. [`CredentialsStore`] finds that file through
//! [`cli_auth_paths::PathResolver`], validates it on every read, and
//! replaces it wholesale on every write.
//!
//! # Features
//!
//! - **CredentialsRepository trait**: `get` / `update` / `config_path`
//! - **CredentialsStore**: `auth.json` with owner-only permissions
//! - **MemoryCredentialsStore**: in-memory storage for testing
//!
//! # Example
//!
//! ```rust,no_run
//! use cli_auth_credentials::{Credentials, CredentialsRepository, CredentialsStore};
//!
//! let store = CredentialsStore::new("com.vercel.cli");
//!
//! // `update` overwrites the whole file; merge first to keep other fields.
//! let mut creds = store.get().unwrap_or_default();
//! creds.merge(Credentials::new().with_token("vca_abc").with_expires_at(1_767_225_600.0));
//! store.update(&creds).unwrap();
//!
//! println!("credentials at {}", store.config_path().display());
//! ```

mod error;
mod store;
mod validate;
mod value;

pub use error::CredentialError;
pub use store::{CredentialsRepository, CredentialsStore, MemoryCredentialsStore};
pub use validate::{validate_document, FieldViolation, ROOT_FIELD};
pub use value::{Credentials, PersistedCredentials};

pub use cli_auth_secret::SecretString;
