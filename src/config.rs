use crate::client::Client;
use crate::generate::{Generator, DEFAULT_PATH_LIMIT};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the episodes API
    #[arg(long, env = "PODCASTR_API_URL", default_value = "http://localhost:3333", global = true)]
    pub api_url: String,

    /// Directory the pages are written to
    #[arg(long, env = "PODCASTR_OUT_DIR", default_value = "out", global = true)]
    pub out_dir: PathBuf,

    /// How many recent episodes to pre-render
    #[arg(long, env = "PODCASTR_PATH_LIMIT", default_value_t = DEFAULT_PATH_LIMIT, global = true)]
    pub limit: usize,

    /// HTTP timeout in seconds
    #[arg(long, env = "PODCASTR_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn client(&self) -> Client {
        Client::new(&self.api_url, Duration::from_secs(self.timeout_secs))
    }

    pub fn generator(&self) -> Generator {
        Generator::new(Arc::new(self.client()), self.out_dir.clone()).with_limit(self.limit)
    }
}
