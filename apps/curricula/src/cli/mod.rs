//! # Curricula CLI Module
//!
//! This module implements the CLI interface for Curricula.
//!
//! ## Available Commands
//!
//! - `degrees` - List degree programs in the catalog
//! - `reqs` - Show normalized requirements for a degree
//! - `missing` - Report missing degree requirements
//! - `option-missing` - Report missing option requirements
//! - `tags` - Show the course -> tag index for a degree
//! - `search` - Search the course catalog

mod commands;

use clap::{Parser, Subcommand};
use curricula_core::CurriculaError;
use curricula_core::search::DEFAULT_PAGE_SIZE;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Curricula - Degree Requirement Planner
///
/// Evaluates which degree/option requirements a set of completed courses
/// satisfies, and serves course/tag metadata from a catalog snapshot.
#[derive(Parser, Debug)]
#[command(name = "curricula")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the catalog snapshot file
    #[arg(short = 'C', long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List degree programs in the catalog
    Degrees,

    /// Show normalized requirements for a degree
    Reqs {
        /// Degree program identifier, e.g. "management_engineering"
        #[arg(short, long)]
        degree: String,

        /// Catalog year the plan was declared
        #[arg(short, long)]
        year: u16,
    },

    /// Report missing degree requirements for completed courses
    Missing {
        /// Degree program identifier
        #[arg(short, long)]
        degree: String,

        /// Catalog year the plan was declared
        #[arg(short, long)]
        year: u16,

        /// Completed course codes (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        taken: Vec<String>,
    },

    /// Report missing option requirements for completed courses
    OptionMissing {
        /// Option identifier, e.g. "management_sciences_option"
        #[arg(short, long)]
        option: String,

        /// Catalog year the plan was declared
        #[arg(short, long)]
        year: u16,

        /// Completed course codes (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        taken: Vec<String>,
    },

    /// Show the course -> tag index for a degree
    Tags {
        /// Degree program identifier
        #[arg(short, long)]
        degree: String,

        /// Catalog year the plan was declared
        #[arg(short, long)]
        year: u16,
    },

    /// Search the course catalog
    Search {
        /// Free-text query over course code and name
        #[arg(default_value = "")]
        query: String,

        /// Restrict results to one tag's course pool
        #[arg(short, long)]
        tag: Option<String>,

        /// Degree snapshot for tag filtering and annotation
        #[arg(long)]
        degree: Option<String>,

        /// Catalog year for the degree snapshot
        #[arg(long)]
        year: Option<u16>,

        /// Option snapshot for tag filtering and annotation
        #[arg(long)]
        option: Option<String>,

        /// Catalog year for the option snapshot
        #[arg(long)]
        option_year: Option<u16>,

        /// Number of ranked results to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CurriculaError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Reqs { degree, year }) => cmd_reqs(&cli.catalog, json_mode, &degree, year),
        Some(Commands::Missing {
            degree,
            year,
            taken,
        }) => cmd_missing(&cli.catalog, json_mode, &degree, year, &taken),
        Some(Commands::OptionMissing {
            option,
            year,
            taken,
        }) => cmd_option_missing(&cli.catalog, json_mode, &option, year, &taken),
        Some(Commands::Tags { degree, year }) => cmd_tags(&cli.catalog, json_mode, &degree, year),
        Some(Commands::Search {
            query,
            tag,
            degree,
            year,
            option,
            option_year,
            offset,
            limit,
        }) => cmd_search(
            &cli.catalog,
            json_mode,
            &query,
            tag.as_deref(),
            degree.as_deref(),
            year,
            option.as_deref(),
            option_year,
            offset,
            limit,
        ),
        // No subcommand - list degrees by default
        Some(Commands::Degrees) | None => cmd_degrees(&cli.catalog, json_mode),
    }
}
