// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lingo locale routing server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lingo_server::{create_app_state, create_router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lingo server - locale detection and root redirects over HTTP.
#[derive(Parser, Debug)]
#[command(name = "lingo-server", about = "Lingo locale routing server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/lingo/server.toml)
	#[arg(long, env = "LINGO_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
	/// Load and validate the configuration, then exit
	CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Load .env file if present
	dotenvy::dotenv().ok();

	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("lingo-server {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	let config = match &args.config {
		Some(path) => lingo_server_config::load_config_with_file(path)?,
		None => lingo_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	if let Some(Command::CheckConfig) = args.command {
		tracing::info!(
			strategy = %config.i18n.strategy,
			default_locale = %config.i18n.default_locale,
			locales = config.i18n.registry.len(),
			"configuration is valid"
		);
		return Ok(());
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		strategy = %config.i18n.strategy,
		default_locale = %config.i18n.default_locale,
		"starting lingo-server"
	);

	let state = create_app_state(&config);
	let app = create_router(state).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
