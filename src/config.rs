//! Command-line configuration

use std::path::PathBuf;

use clap::Parser;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_LOG_FILE, DEFAULT_PATH};
use crate::models::RequestState;

#[derive(Parser, Debug, Clone)]
#[command(name = "ctlprobe", version, about = "Explore a local control-plane service over HTTP")]
pub struct Args {
    /// Base URL of the service
    #[arg(long, env = "CTLPROBE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "CTLPROBE_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// Path staged at startup
    #[arg(long, env = "CTLPROBE_PATH", default_value = DEFAULT_PATH)]
    pub path: String,

    /// Where to write the trace log
    #[arg(long, env = "CTLPROBE_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Args {
    /// Initial request draft
    pub fn request_state(&self) -> RequestState {
        RequestState {
            base_url: self.base_url.clone(),
            auth_token: self.token.clone(),
            path: self.path.clone(),
            ..RequestState::default()
        }
    }
}
