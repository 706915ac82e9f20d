//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::content_cmd::{self, ListFilter};
use super::output::{Output, OutputFormat};
use super::publish;
use crate::domain::{ContentKind, Maturity, ProjectType};
use crate::storage::{Config, Site};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Content collections, RSS feed and sitemap for a portfolio site")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config's default_format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new folio site
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Create a new content file
    New {
        /// Content kind (blog, projects, work, garden)
        kind: ContentKind,

        /// Title (company name for work entries); also used for the slug
        title: String,
    },

    /// Validate all content and report warnings
    Check,

    /// List a collection as the site shows it
    List {
        /// Content kind (blog, projects, work, garden)
        kind: ContentKind,

        /// Only blog posts with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only projects of this type (professional, personal)
        #[arg(long = "type")]
        project_type: Option<ProjectType>,

        /// Only garden notes of this maturity (seedling, budding, evergreen)
        #[arg(long)]
        maturity: Option<Maturity>,

        /// Include draft blog posts
        #[arg(long)]
        all: bool,
    },

    /// Generate the RSS feed
    Feed {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Generate the sitemap
    Sitemap {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Validate content and write the feed and sitemap to the output directory
    Build,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format,
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("folio starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing site at: {}", path));
            let site = Site::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Content directory: {}", site.content_dir().display()),
            );
            output.success(&format!("Initialized folio site at {}", site.root().display()));
        }

        Commands::New { kind, title } => content_cmd::new_record(&output, kind, &title)?,

        Commands::Check => content_cmd::check(&output)?,

        Commands::List {
            kind,
            tag,
            project_type,
            maturity,
            all,
        } => {
            let filter = ListFilter {
                tag,
                project_type,
                maturity,
                include_drafts: all,
            };
            output.verbose_ctx("list", &format!("Listing {} with {:?}", kind, filter));
            content_cmd::list(&output, kind, &filter)?
        }

        Commands::Feed { output: path } => publish::feed(&output, path.as_deref())?,

        Commands::Sitemap { output: path } => publish::sitemap(&output, path.as_deref())?,

        Commands::Build => publish::build(&output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
