mod generate;
mod schema;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schema-puml")]
#[command(author = "Helge Sverre <helge.sverre@gmail.com>")]
#[command(version)]
#[command(about = "Generate PlantUML diagrams from database catalog snapshots", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a catalog snapshot as a PlantUML diagram
    Generate {
        /// Catalog snapshot file (.json, .yaml, .yml)
        /// Supports .gz, .bz2, .xz, .zst compression
        file: PathBuf,

        /// Output diagram file (.puml, .plantuml, .pu; default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram type: entity or class
        #[arg(short = 't', long = "type", default_value = "entity")]
        diagram_type: String,

        /// JSON or YAML file with render options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only include these schemas (comma-separated)
        #[arg(long)]
        include_schemas: Option<String>,

        /// Exclude these schemas (comma-separated)
        #[arg(long)]
        exclude_schemas: Option<String>,

        /// Exclude tables by name or wildcard, e.g. "tmp_*" (comma-separated)
        #[arg(long)]
        exclude_tables: Option<String>,

        /// Only include tables matching these regular expressions (comma-separated)
        #[arg(long)]
        include_patterns: Option<String>,

        /// Exclude tables matching these regular expressions (comma-separated)
        #[arg(long)]
        exclude_patterns: Option<String>,

        /// Maximum number of tables to render (0 = unlimited)
        #[arg(long)]
        max_tables: Option<usize>,

        /// Show column data types (true/false)
        #[arg(long)]
        include_data_types: Option<bool>,

        /// Draw foreign-key relationships (true/false)
        #[arg(long)]
        include_relationships: Option<bool>,

        /// List non-primary-key indexes (true/false)
        #[arg(long)]
        include_indexes: Option<bool>,

        /// Show table and column descriptions (true/false)
        #[arg(long)]
        include_descriptions: Option<bool>,

        /// PlantUML theme name
        #[arg(long)]
        theme: Option<String>,

        /// Schema whose tables are shown without a schema prefix
        #[arg(long)]
        default_schema: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the JSON Schema of an input file format
    Schema {
        /// Schema name: config or snapshot
        #[arg(default_value = "config")]
        name: String,

        /// List available schema names
        #[arg(long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            file,
            output,
            diagram_type,
            config,
            include_schemas,
            exclude_schemas,
            exclude_tables,
            include_patterns,
            exclude_patterns,
            max_tables,
            include_data_types,
            include_relationships,
            include_indexes,
            include_descriptions,
            theme,
            default_schema,
            verbose,
        } => {
            init_logging(verbose);
            generate::run(generate::GenerateArgs {
                file,
                output,
                diagram_type,
                config,
                overrides: crate::config::OptionOverrides {
                    include_schemas: split_list(include_schemas),
                    exclude_schemas: split_list(exclude_schemas),
                    exclude_tables: split_list(exclude_tables),
                    include_table_patterns: split_list(include_patterns),
                    exclude_table_patterns: split_list(exclude_patterns),
                    max_tables,
                    include_data_types,
                    include_relationships,
                    include_indexes,
                    include_descriptions,
                    theme,
                    default_schema,
                },
            })
        }
        Commands::Schema { name, list } => schema::run(&name, list),
        Commands::Completions { shell } => {
            generate_completions(
                shell,
                &mut Cli::command(),
                "schema-puml",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

/// Split a comma-separated argument into trimmed, non-empty items
fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Log to stderr; RUST_LOG wins over the verbosity flag
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
