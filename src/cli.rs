//! Command-line interface implementation for pkgsmith.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for pkgsmith.
#[derive(Parser, Debug)]
#[command(author, version, about = "pkgsmith: regenerate package manifests and scaffolds", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the manifest and generated files, then copy the scaffold
    Generate {
        /// Project directory holding the descriptor and package.json
        #[arg(value_name = "PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,

        /// Run the documentation tool after the scaffold is in place
        #[arg(long)]
        with_docs: bool,
    },

    /// Run the documentation tool only
    Docs {
        #[arg(value_name = "PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,
    },

    /// Print the build-pipeline configuration as JSON
    Pipeline {
        /// Display name of the application
        #[arg(long)]
        name: String,

        /// SVG icon, embedded as a data URI
        #[arg(long, value_name = "SVG")]
        icon: PathBuf,

        /// Folder packaged with the build output (repeatable)
        #[arg(long = "folder", value_name = "FOLDER")]
        folders: Vec<String>,

        /// Do not mark the application as standalone
        #[arg(long)]
        no_standalone: bool,

        #[arg(value_name = "PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingSubcommand
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
