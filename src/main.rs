//! # Polkadots CLI
//!
//! Command-line interface for polka-dot rendering.
//!
//! ## Usage
//!
//! ```bash
//! # Render one image with the default colors (black dots on white)
//! polkadots render photo.jpg photo_polka.png
//!
//! # Custom colors, QR stamp in the corner
//! polkadots render photo.jpg out.png --background '#fff0c8' --dots 180,20,60 --stamp https://example.com
//!
//! # Process a host batch request, writing failures to a ledger
//! polkadots batch request.json --ledger errors.json
//!
//! # Show the module descriptor
//! polkadots info
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use polkadots::{
    PolkaConfig, PolkaError, Rgb,
    host::{self, BatchRequest, MeminfoProbe, NoStamp, QrStamper, Stamper},
    logging, render,
};

/// Polkadots - halftone polka-dot stylizer
#[derive(Parser, Debug)]
#[command(name = "polkadots")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a single image
    Render {
        /// Source image
        input: PathBuf,

        /// Output PNG path
        output: PathBuf,

        /// Background color, `r,g,b` or `#rrggbb`
        #[arg(long, default_value = "255,255,255")]
        background: Rgb,

        /// Dot color, `r,g,b` or `#rrggbb`
        #[arg(long, default_value = "0,0,0")]
        dots: Rgb,

        /// Stamp a QR code encoding this payload in the bottom-right corner
        #[arg(long, value_name = "PAYLOAD")]
        stamp: Option<String>,
    },

    /// Process a JSON batch request
    Batch {
        /// Request file
        request: PathBuf,

        /// Stamp a QR code encoding this payload on every output
        #[arg(long, value_name = "PAYLOAD")]
        stamp: Option<String>,

        /// Write the error ledger to this file as JSON
        #[arg(long, value_name = "FILE")]
        ledger: Option<PathBuf>,
    },

    /// Print the module descriptor as JSON
    Info,
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn stamper_for(payload: Option<String>) -> Box<dyn Stamper> {
    match payload {
        Some(payload) => Box::new(QrStamper::new(payload)),
        None => Box::new(NoStamp),
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            background,
            dots,
            stamp,
        } => {
            let config = PolkaConfig::new(background, dots);
            let mut canvas = render::make_polka(&input, &config)?;
            stamper_for(stamp).stamp(&mut canvas)?;

            canvas
                .save(&output)
                .map_err(|e| PolkaError::Save(format!("{}: {}", output.display(), e)))?;

            println!(
                "Saved {}x{} dots to {}",
                canvas.width() / render::MULTIPLIER,
                canvas.height() / render::MULTIPLIER,
                output.display()
            );
        }

        Commands::Batch {
            request,
            stamp,
            ledger,
        } => {
            let json = fs::read_to_string(&request)?;
            let request = BatchRequest::from_json(&json)?;

            let report =
                host::process_batch(&request, stamper_for(stamp).as_ref(), &MeminfoProbe::default())?;

            println!(
                "Processed {} item(s): {} rendered, {} failed",
                report.outcomes.len(),
                report.rendered(),
                report.failed()
            );
            if !report.ledger.is_empty() {
                println!("Failures:");
                for entry in report.ledger.entries() {
                    println!("  {}: {}", entry.source.display(), entry.message);
                }
            }

            if let Some(path) = ledger {
                fs::write(&path, report.ledger.to_json())?;
                println!("Ledger written to {}", path.display());
            }
        }

        Commands::Info => {
            println!("{}", serde_json::to_string_pretty(&host::module_info())?);
        }
    }

    Ok(())
}
