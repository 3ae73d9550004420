use crate::config::toml_config::GatewayConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "site-forge")]
#[command(about = "Generate single-page websites from a prompt and preview them in a sandbox")]
pub struct Cli {
    /// Path to a TOML configuration file; the environment is used when omitted
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the generation API and the preview page
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// Directory holding index.html and client.js
        #[arg(long)]
        static_dir: Option<String>,
    },

    /// Generate one site and write a sandboxed preview page
    Generate {
        #[arg(short, long)]
        prompt: String,

        #[arg(short, long, default_value = "preview.html")]
        out: String,
    },
}

impl Cli {
    /// Loads the file or environment configuration and applies flag overrides.
    pub fn load_config(&self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_file(path)?,
            None => GatewayConfig::from_env()?,
        };

        if let Command::Serve {
            host,
            port,
            static_dir,
        } = &self.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(static_dir) = static_dir {
                config.server.static_dir = static_dir.clone();
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_serve_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 3100\nhost = \"127.0.0.1\"\n[model]\napi_key = \"k\"\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from(["site-forge", "--config", &path, "serve", "--port", "9000"]);
        let config = cli.load_config().unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["site-forge", "generate", "--prompt", "a bakery"]);
        match cli.command {
            Command::Generate { prompt, out } => {
                assert_eq!(prompt, "a bakery");
                assert_eq!(out, "preview.html");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
