// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credentials directory resolution.
//!
//! A tool may have stored its credentials in one of several places over its
//! lifetime: its own platform data directory, the predecessor tool's `~/.now`
//! dotfile directory, or the predecessor's platform data directory.
//! [`PathResolver`] probes those in priority order and picks the first that
//! exists, falling back to where a fresh install would put it.
//!
//! The platform conventions are injected through [`PlatformDirs`] so that
//! resolution can be exercised against a temporary directory tree.

pub mod platform;
pub mod resolver;

pub use platform::{PlatformDirs, StaticDirs, SystemDirs};
pub use resolver::{is_directory, Candidate, CandidateKind, PathResolver, ResolverConfig};
