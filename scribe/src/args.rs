use std::path::PathBuf;

use clap::{Parser, builder::FalseyValueParser};

/// Scribe transcription server
#[derive(Debug, Parser)]
#[command(name = "scribe", about = "Forward audio to Deepgram and keep every transcript as JSON")]
pub struct Args {
    /// Path to configuration file; without one, defaults plus `DEEPGRAM_API_KEY` are used
    #[arg(short, long, env = "SCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "SCRIBE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Verbose logging (`DEBUG=1`)
    #[arg(long, env = "DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,
}
