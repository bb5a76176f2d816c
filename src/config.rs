//! Configuration for LinkBio
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// LinkBio - link-in-bio page backend
#[derive(Parser, Debug, Clone)]
#[command(name = "linkbio")]
#[command(about = "Link-in-bio page builder backend")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "LINKBIO_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// SQLite database file (":memory:" for a throwaway database)
    #[arg(long, env = "LINKBIO_DB_PATH", default_value = "linkbio.db")]
    pub db_path: PathBuf,

    /// Directory for the daily log files
    #[arg(long, env = "LINKBIO_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Browser origin allowed by CORS; any origin when unset
    #[arg(long, env = "LINKBIO_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,
}

impl Config {
    /// Defaults without reading the command line, for tests
    pub fn for_tests() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 0)),
            db_path: PathBuf::from(":memory:"),
            log_dir: PathBuf::from("logs"),
            allowed_origin: None,
        }
    }
}
