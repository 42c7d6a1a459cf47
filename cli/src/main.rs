//! EventKit CLI — run payloads through the content-type codec registry.
//!
//! # Commands
//! ```text
//! eventkit encode        --content-type <mime>   < value.json
//! eventkit decode        --content-type <mime>   < payload
//! eventkit content-types
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventkit_codec::{CodecRegistry, ObservedCodec};
use eventkit_observability::{init_tracing, LogConfig, TracingObservability};

mod cmd_codec;

#[derive(Parser)]
#[command(
    name = "eventkit",
    about = "Encode and decode event payloads by content type",
    long_about = "
EventKit CLI: feed a payload on stdin and get it back encoded or decoded
with the codec registered for the given content type. An empty content
type selects the default (JSON) codec.

ENVIRONMENT VARIABLES:
  RUST_LOG    Overrides the log filter (e.g. eventkit_codec=trace)
",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON logs
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a JSON value from stdin and write it in the target format
    Encode {
        /// Target content type ("" = default)
        #[arg(short, long, default_value = "")]
        content_type: String,
    },

    /// Read a payload from stdin and print it as JSON
    Decode {
        /// Source content type ("" = default)
        #[arg(short, long, default_value = "")]
        content_type: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List registered content types
    #[command(name = "content-types")]
    ContentTypes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: if cli.verbose { "debug" } else { "warn" }.into(),
        json: cli.log_json,
        ..LogConfig::default()
    };
    init_tracing(&log_config)?;

    let codec = ObservedCodec::new(
        CodecRegistry::with_defaults(),
        Arc::new(TracingObservability),
    );

    match cli.command {
        Commands::Encode { content_type } => cmd_codec::encode(&codec, &content_type),
        Commands::Decode {
            content_type,
            pretty,
        } => cmd_codec::decode(&codec, &content_type, pretty),
        Commands::ContentTypes => {
            cmd_codec::list(codec.registry());
            Ok(())
        }
    }
}
