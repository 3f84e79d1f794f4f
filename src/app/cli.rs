use clap::Parser;
use std::path::PathBuf;

/// mpd-mirror - a terminal mirror of your MPD queue and library 🎵
#[derive(Parser, Debug, Default)]
#[command(name = "mpd-mirror", version, about)]
pub struct Args {
    /// MPD host (overrides config.toml)
    #[arg(long)]
    pub mpd_host: Option<String>,

    /// MPD port (overrides config.toml)
    #[arg(long)]
    pub mpd_port: Option<u16>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the default config.toml to stdout and exit
    #[arg(long)]
    pub generate_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded file.
    pub fn apply(&self, config: &mut crate::app::config::UserConfig) {
        if let Some(host) = &self.mpd_host {
            config.mpd.host = host.clone();
        }
        if let Some(port) = self.mpd_port {
            config.mpd.port = port;
        }
    }
}
