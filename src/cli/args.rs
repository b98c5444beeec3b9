//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate VitePress API reference pages and sidebar from Doxygen XML
#[derive(Parser, Debug)]
#[command(name = "refpress")]
#[command(about = "Generate VitePress API reference pages and sidebar from Doxygen XML")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Whether the chosen command asked for verbose output
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Generate { verbose, .. } | Command::Check { verbose, .. } => *verbose,
            _ => false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the sidebar manifest and reference pages
    Generate {
        /// Directory containing Doxygen's index.xml
        xml_dir: PathBuf,

        /// Docs root (the directory holding .vitepress/)
        #[arg(short, long)]
        docs: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// URL prefix of the reference section
        #[arg(long)]
        base_path: Option<String>,

        /// Sidebar output format (ts, json)
        #[arg(long, value_parser = ["ts", "json"])]
        format: Option<String>,

        /// Start sidebar sections expanded
        #[arg(long)]
        expanded: bool,

        /// Also render .vitepress/config.mts
        #[arg(long)]
        site_config: bool,

        /// Delete generated pages that are no longer produced
        #[arg(long)]
        prune: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the sidebar manifest as JSON without writing anything
    Sidebar {
        /// Directory containing Doxygen's index.xml
        xml_dir: PathBuf,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// URL prefix of the reference section
        #[arg(long)]
        base_path: Option<String>,
    },

    /// Validate an emitted sidebar manifest against the pages on disk
    Check {
        /// Docs root (the directory holding .vitepress/)
        docs: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// URL prefix of the reference section
        #[arg(long)]
        base_path: Option<String>,

        /// Sidebar format to read (ts, json)
        #[arg(long, value_parser = ["ts", "json"])]
        format: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}
