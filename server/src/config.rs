use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Drop4 game server
#[derive(Clone, Debug, Parser)]
#[command(name = "drop4-server", version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,

    /// Directory with the built web front end
    #[arg(long, default_value = "web/dist")]
    pub static_dir: PathBuf,

    /// Pause before the computer answers a human move, in milliseconds
    #[arg(long, default_value_t = 600)]
    pub ai_delay_ms: u64,

    /// Seed for the computer's tie-breaking; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["drop4-server"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.ai_delay(), Duration::from_millis(600));
        assert!(config.seed.is_none());
    }

    #[test]
    fn parses_flags() {
        let config = Config::parse_from([
            "drop4-server",
            "--addr",
            "127.0.0.1:8080",
            "--ai-delay-ms",
            "0",
            "--seed",
            "17",
        ]);
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.ai_delay(), Duration::ZERO);
        assert_eq!(config.seed, Some(17));
    }
}
