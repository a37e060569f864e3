//! csvmatrix CLI - Matrix operations on CSV files
//!
//! # Main Commands
//!
//! ```bash
//! csvmatrix serve                     # Start HTTP server (port 8080)
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! csvmatrix apply sum matrix.csv      # Run one operation on a local file
//! csvmatrix operations                # Show available operations
//! ```

use clap::{Parser, Subcommand};
use csvmatrix::{operations_description, run_file, Operation, ServerConfig};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "csvmatrix")]
#[command(about = "Echo, flatten, transpose, sum and multiply square CSV matrices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (default: CSVMATRIX_PORT or 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Maximum upload size in bytes
        #[arg(long)]
        max_upload_bytes: Option<usize>,

        /// Answer request errors with 400/422 instead of 200
        #[arg(long)]
        status_codes: bool,
    },

    /// Apply one operation to a CSV file
    Apply {
        /// Operation: echo, flatten, invert, sum, multiply
        operation: Operation,

        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show available operations
    Operations,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            max_upload_bytes,
            status_codes,
        } => cmd_serve(port, max_upload_bytes, status_codes).await,

        Commands::Apply {
            operation,
            input,
            output,
        } => cmd_apply(operation, &input, output.as_deref()),

        Commands::Operations => cmd_operations(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(
    port: Option<u16>,
    max_upload_bytes: Option<usize>,
    status_codes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(limit) = max_upload_bytes {
        config.max_upload_bytes = limit;
    }
    config.status_codes |= status_codes;

    csvmatrix::server::start_server(config).await?;
    Ok(())
}

fn cmd_apply(
    operation: Operation,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 {}: {}", operation, input.display());

    let result = run_file(operation, input).map_err(|e| e.body())?;
    eprintln!("   {}x{} matrix", result.dimension, result.dimension);

    write_output(&result.body, output)?;
    Ok(())
}

fn cmd_operations() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", operations_description());
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None if content.ends_with('\n') => print!("{}", content),
        None => println!("{}", content),
    }
    Ok(())
}
