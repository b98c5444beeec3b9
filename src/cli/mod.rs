//! CLI module for refpress

mod args;

pub use args::{Args, Command};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::ReferenceGenerator;
use crate::sidebar::{check_pages, read_manifest, SidebarManifest};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_logging(args.verbose());

    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `--verbose` enables INFO, otherwise RUST_LOG or WARN
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(config: Option<&Path>) -> Result<Config> {
    match config {
        Some(path) if !path.exists() => Err(Error::PathNotFound(path.to_path_buf())),
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

fn execute(args: Args) -> Result<ExitCode> {
    match args.command {
        Command::Generate {
            xml_dir,
            docs,
            config,
            base_path,
            format,
            expanded,
            site_config,
            prune,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(docs, base_path, format, expanded, site_config, prune);
            cfg.validate()?;

            if verbose {
                println!("XML: {}", xml_dir.display());
                println!("Docs root: {}", cfg.output.docs_root.display());
                println!("Pages: {}", cfg.src_root().display());
                println!("Base path: {}", cfg.reference.normalized_base());
                println!("Sidebar: {}", cfg.sidebar_path().display());
                println!("Collapsed: {}", cfg.reference.collapsed);
                println!("Site config: {}", cfg.site.emit_config);
                if !cfg.reference.exclude_groups.is_empty() {
                    println!("Exclude: {:?}", cfg.reference.exclude_groups);
                }
            }

            if !xml_dir.exists() {
                return Err(Error::PathNotFound(xml_dir));
            }

            println!("Reading Doxygen XML...");
            let generator = ReferenceGenerator::new(cfg)?.with_verbose(verbose);
            let report = generator.generate(&xml_dir)?;

            println!("{}", report.summary());
            println!("Sidebar written to: {}", report.sidebar_path.display());
            for path in &report.pages.pruned {
                println!("  removed {}", path.display());
            }

            Ok(ExitCode::SUCCESS)
        }

        Command::Sidebar {
            xml_dir,
            config,
            base_path,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(None, base_path, None, false, false, false);

            let generator = ReferenceGenerator::new(cfg)?;
            let (_, inventory) = generator.load(&xml_dir)?;
            let manifest: SidebarManifest = generator.manifest(&inventory)?;

            println!("{}", serde_json::to_string_pretty(&manifest)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Check {
            docs,
            config,
            base_path,
            format,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(docs, base_path, format, false, false, false);
            cfg.validate()?;

            let sidebar_path: PathBuf = cfg.sidebar_path();
            let manifest = read_manifest(&sidebar_path)?;
            if verbose {
                println!(
                    "Checking {} ({} sections, {} entries)",
                    sidebar_path.display(),
                    manifest.len(),
                    manifest.entry_count()
                );
            }

            let report = check_pages(&manifest, &cfg.src_root(), &cfg.reference.normalized_base())?;
            for issue in report.errors() {
                println!("error: {}", issue);
            }
            for issue in report.warnings() {
                println!("warning: {}", issue);
            }
            println!("{}", report.summary());

            if report.is_clean() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }

        Command::Version => {
            println!("refpress {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}
