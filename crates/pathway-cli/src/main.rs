//! pathway CLI — serve the assessment API and work with stored records.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pathway", version, about = "Career interest assessment service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen address, overriding the config (e.g. "127.0.0.1:8000")
        #[arg(long)]
        bind: Option<String>,
    },

    /// Score and store a submission read from a JSON file
    Submit {
        /// Submission JSON (`student_info` and `responses`)
        #[arg(long)]
        input: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a submission without storing it
    Score {
        /// Submission JSON (`student_info` and `responses`)
        #[arg(long)]
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path (selects the validation policy)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List stored records with a cohort summary
    List {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export every record as CSV
    Export {
        /// Destination file
        #[arg(long)]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write one student's PDF report
    Report {
        /// Record id
        #[arg(long)]
        id: i64,

        /// Destination file
        #[arg(long)]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter pathway.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pathway=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config, bind } => commands::serve::execute(config, bind).await,
        Commands::Submit { input, config } => commands::submit::execute(input, config).await,
        Commands::Score {
            input,
            format,
            config,
        } => commands::score::execute(input, format, config),
        Commands::List { config, format } => commands::list::execute(config, format).await,
        Commands::Export { output, config } => commands::export::execute(output, config).await,
        Commands::Report { id, output, config } => {
            commands::report::execute(id, output, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
