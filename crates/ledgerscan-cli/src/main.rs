mod commands;
mod output;
mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ledgerscan",
    version,
    about = "Extract tables and balance bounds from spreadsheets and PDF statements"
)]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP upload service
    Serve {
        /// Address to bind
        #[arg(long, env = "LEDGERSCAN_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "LEDGERSCAN_PORT", default_value_t = 5000)]
        port: u16,

        /// Allowed upload extension(s), replacing the default list
        #[arg(long = "allow-ext", value_name = "EXT")]
        allow_ext: Vec<String>,

        /// Maximum request body size in megabytes
        #[arg(long, default_value_t = 32)]
        max_upload_mb: usize,
    },
    /// Extract from local files as one upload batch (last file wins)
    Extract {
        /// Spreadsheet or PDF file(s)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Allowed extension(s), replacing the default list
        #[arg(long = "allow-ext", value_name = "EXT")]
        allow_ext: Vec<String>,
    },
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            allow_ext,
            max_upload_mb,
        } => commands::serve::run(host, port, allow_ext, max_upload_mb),
        Commands::Extract {
            files,
            output,
            allow_ext,
        } => commands::extract::run(files, &output, allow_ext),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
