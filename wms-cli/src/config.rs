//! Configuration module
//!
//! Settings shared by every command: where the server lives and how to talk to it.

use anyhow::{Result, bail};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the WMS server
    pub host: String,
    /// Bearer token (from `WMS_MONITOR_TOKEN`)
    pub token: Option<String>,
    /// Treat unrecognized response codes as fatal
    pub strict: bool,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            bail!("host cannot be empty");
        }

        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            bail!("host must start with http:// or https://");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> Config {
        Config {
            host: host.to_string(),
            token: None,
            strict: false,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(config("http://localhost:5000").validate().is_ok());
        assert!(config("https://wms.example.org/").validate().is_ok());

        assert!(config("").validate().is_err());
        assert!(config("localhost:5000").validate().is_err());
        assert!(config("ftp://localhost").validate().is_err());
    }
}
