//! # Curricula - Degree Requirement Planner
//!
//! The main binary for the Curricula matching engine.
//!
//! This application provides:
//! - CLI interface for requirement evaluation and catalog search
//! - Catalog snapshot loading (JSON file)
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               apps/curricula (THE BINARY)            │
//! │                                                      │
//! │  ┌─────────────┐        ┌─────────────────────────┐  │
//! │  │   CLI       │        │  Catalog Loader         │  │
//! │  │  (clap)     │        │  (JSON -> MemoryCatalog)│  │
//! │  └──────┬──────┘        └───────────┬─────────────┘  │
//! │         │                           │                │
//! │         └──────────────┬────────────┘                │
//! │                        ▼                             │
//! │               ┌─────────────────┐                    │
//! │               │ curricula-core  │                    │
//! │               │  (THE LOGIC)    │                    │
//! │               └─────────────────┘                    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # List degree programs
//! curricula --catalog catalog.json degrees
//!
//! # Missing requirements for a set of completed courses
//! curricula --catalog catalog.json missing -d software_engineering -y 2023 \
//!     -t CS137,MATH115,ECE105
//!
//! # Tag-filtered catalog search
//! curricula --catalog catalog.json search MSCI --tag TE \
//!     --degree management_engineering --year 2023
//! ```

use clap::Parser;
use curricula::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — CURRICULA_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CURRICULA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "curricula=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Curricula startup banner.
fn print_banner() {
    println!(
        "curricula v{} — deterministic degree-requirement planner\n",
        env!("CARGO_PKG_VERSION")
    );
}
