//! `filehttpd`: serve one directory over HTTP on a fixed address.
//!
//! Usage: `filehttpd [config.json]`. Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;

use filehttp_rs::{HttpServer, ServerConfig};
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => match ServerConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return ExitCode::from(e.exit_code());
            }
        },
        None => ServerConfig::default(),
    };

    match HttpServer::new(config).start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
