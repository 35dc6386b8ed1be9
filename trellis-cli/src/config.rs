//! Configuration module
//!
//! Handles CLI configuration: which FlowerPower executable and which Python
//! interpreter the dispatchers talk to.

use trellis_client::ClientConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// FlowerPower executable used by the subprocess strategy
    pub flowerpower_bin: String,
    /// Python interpreter used by the library strategy and installs
    pub python: String,
}

impl Config {
    /// Dispatcher settings derived from this configuration
    pub fn client(&self) -> anyhow::Result<ClientConfig> {
        let client = ClientConfig::new(&self.flowerpower_bin, &self.python);
        client.validate().map_err(anyhow::Error::msg)?;
        Ok(client)
    }
}
