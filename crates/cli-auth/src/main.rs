// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! cli-auth - inspect a CLI's stored credentials.
//!
//! Prints where `auth.json` resolves to, which candidate directories were
//! considered, and whether the stored credentials are usable. Tokens are
//! never printed.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli_auth_credentials::{CredentialsRepository, CredentialsStore};
use cli_auth_paths::{is_directory, PathResolver};

mod report;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
	Trace,
	Debug,
	Info,
	Warn,
	Error,
}

impl From<LogLevel> for tracing::Level {
	fn from(level: LogLevel) -> Self {
		match level {
			LogLevel::Trace => tracing::Level::TRACE,
			LogLevel::Debug => tracing::Level::DEBUG,
			LogLevel::Info => tracing::Level::INFO,
			LogLevel::Warn => tracing::Level::WARN,
			LogLevel::Error => tracing::Level::ERROR,
		}
	}
}

/// Inspect a CLI's auth.json credentials file
#[derive(Parser, Debug)]
#[command(name = "cli-auth", version, about, long_about = None)]
struct Args {
	/// Tool identifier whose data directories are searched
	#[arg(long, env = "CLI_AUTH_TOOL", default_value = "com.vercel.cli")]
	tool: String,

	/// Log level (RUST_LOG takes precedence)
	#[arg(short, long, value_enum, default_value_t = LogLevel::Warn)]
	log_level: LogLevel,

	/// Output logs as JSON
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
	/// Print the resolved auth.json path
	Path,
	/// List every candidate directory in priority order
	Candidates,
	/// Report whether usable credentials are stored
	Status,
}

fn init_tracing(level: LogLevel, json: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		let level = tracing::Level::from(level);
		EnvFilter::new(format!(
			"cli_auth={level},cli_auth_paths={level},cli_auth_credentials={level}"
		))
	});

	if json {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().compact().with_writer(std::io::stderr))
			.init();
	}
}

fn now_secs() -> f64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs_f64())
		.unwrap_or(0.0)
}

fn run(args: &Args) -> Result<ExitCode> {
	let resolver = PathResolver::system();

	match args.command {
		Command::Path => {
			println!("{}", resolver.resolve_config_file(&args.tool).display());
			Ok(ExitCode::SUCCESS)
		}
		Command::Candidates => {
			let selected = resolver.resolve_config_dir(&args.tool);
			let candidates: Vec<_> = resolver
				.candidates(&args.tool)
				.into_iter()
				.map(|c| {
					let exists = is_directory(&c.path);
					(c, exists)
				})
				.collect();
			print!("{}", report::candidates_report(&candidates, &selected));
			Ok(ExitCode::SUCCESS)
		}
		Command::Status => {
			let store = CredentialsStore::with_resolver(&args.tool, &resolver);
			let result = match store.get() {
				Err(e) if !e.is_not_found() && !e.is_invalid_document() => {
					return Err(e)
						.with_context(|| format!("failed to read {}", store.config_path().display()));
				}
				other => other,
			};
			if let Err(e) = &result {
				debug!(error = %e, "credentials unavailable");
			}

			let status = report::status_report(store.config_path(), &result, now_secs());
			print!("{}", status.text);
			Ok(if status.logged_in {
				ExitCode::SUCCESS
			} else {
				ExitCode::FAILURE
			})
		}
	}
}

fn main() -> Result<ExitCode> {
	let args = Args::parse();
	init_tracing(args.log_level, args.json_logs);
	debug!(tool = %args.tool, command = ?args.command, "starting");

	run(&args)
}
