use anyhow::Result;
use clap::{Parser, Subcommand};
use linksim_cli::{commands, SchemeArgs};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "linksim")]
#[command(about = "Linksim - data-link stack simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text into a wire bit-string and modulated signal
    Transmit {
        /// Text to transmit
        #[arg(short, long)]
        text: String,

        #[command(flatten)]
        schemes: SchemeArgs,

        /// Emit the full transmit report as JSON
        #[arg(long)]
        json: bool,

        /// Ship the wire to a listening peer (host:port)
        #[arg(long)]
        peer: Option<String>,
    },

    /// Decode a wire bit-string back into text
    Receive {
        /// Wire bit-string ('-' reads stdin)
        #[arg(short, long, conflicts_with = "input")]
        wire: Option<String>,

        /// Read the wire bit-string from a file
        #[arg(short, long)]
        input: Option<String>,

        #[command(flatten)]
        schemes: SchemeArgs,

        /// Emit the receive report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transmit and receive locally, showing every stage
    Roundtrip {
        /// Text to push through the full chain
        #[arg(short, long)]
        text: String,

        #[command(flatten)]
        schemes: SchemeArgs,
    },

    /// Accept transmissions on a TCP port and decode each one
    Listen {
        /// Address to bind (host:port)
        #[arg(short, long, default_value = "127.0.0.1:65432")]
        addr: String,

        #[command(flatten)]
        schemes: SchemeArgs,

        /// Stop after this many exchanges
        #[arg(long, default_value = "1")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Transmit {
            text,
            schemes,
            json,
            peer,
        } => commands::transmit::execute(&text, &schemes.to_config(), json, peer.as_deref()),

        Commands::Receive {
            wire,
            input,
            schemes,
            json,
        } => commands::receive::execute(
            wire.as_deref(),
            input.as_deref(),
            &schemes.to_config(),
            json,
        ),

        Commands::Roundtrip { text, schemes } => {
            commands::roundtrip::execute(&text, &schemes.to_config())
        }

        Commands::Listen {
            addr,
            schemes,
            count,
        } => commands::listen::execute(&addr, &schemes.to_config(), count),
    }
}
