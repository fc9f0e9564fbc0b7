use clap::Parser;
use fileserv::config::Config;
use fileserv::server;
use std::path::PathBuf;

/// Minimal HTTP/1.0 file server.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "FILESERV_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(short = 'd', long = "debug", env = "FILESERV_LOG")]
    log_level: Option<String>,

    /// First port to try
    #[arg(short, long, env = "FILESERV_PORT")]
    port: Option<u16>,

    /// Address to listen on
    #[arg(long, env = "FILESERV_HOST")]
    host: Option<String>,

    /// Directory files are served from
    #[arg(short, long, env = "FILESERV_ROOT")]
    root: Option<PathBuf>,
}

impl Args {
    fn apply(self, cfg: &mut Config) {
        if let Some(level) = self.log_level {
            cfg.logging.level = level;
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(host) = self.host {
            cfg.server.host = host;
        }
        if let Some(root) = self.root {
            cfg.static_files.root = root;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    args.apply(&mut cfg);
    cfg.validate()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level()?)
        .init();

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
