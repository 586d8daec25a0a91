use std::path::PathBuf;

use clap::Parser;
use pictura_config::Config;
use url::Url;

/// Pictura text-to-image generator
#[derive(Debug, Parser)]
#[command(name = "pictura", about = "Browser UI for text-to-image generation")]
pub struct Args {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "PICTURA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "PICTURA_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Override the inference endpoint
    #[arg(long, env = "PICTURA_ENDPOINT")]
    pub endpoint: Option<Url>,
}

impl Args {
    /// Load the configuration file, if any, and apply command line overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(listen) = self.listen {
            config.server.listen_address = Some(listen);
        }

        if let Some(ref endpoint) = self.endpoint {
            config.inference.endpoint = endpoint.clone();
        }

        config.validate()?;

        Ok(config)
    }
}
