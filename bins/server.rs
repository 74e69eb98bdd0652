use clap::Parser;
use common::utils::logging::{init_logging, DEBUG_FILTER, DEFAULT_FILTER};
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// In-memory person directory exposed over HTTP.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Address to bind; overrides `server.host` / `SERVER_HOST`
    #[arg(long)]
    host: Option<String>,

    /// Port to bind; overrides `server.port` / `SERVER_PORT`
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging (ignored when RUST_LOG is set)
    #[arg(long)]
    debug: bool,

    /// Emit JSON structured logs
    #[arg(long)]
    log_json: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut cfg = AppConfig::load_and_validate()?;
    if let Some(host) = &cli.host {
        cfg.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    cfg.server.log_json |= cli.log_json;
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

fn main() -> std::process::ExitCode {
    // load .env first so RUST_LOG and SERVER_* apply
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e:#}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let filter = if cli.debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    init_logging(filter, cfg.server.log_json);
    info!(service = "server", event = "logger_init", debug = cli.debug, "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // panics go through tracing so JSON log collectors see them
    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "server",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    // worker threads come from config (default 4); 0 was normalized away
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        bind = %cfg.server.bind_addr(),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "person directory starting"
    );

    // run the server in its own task so Ctrl+C can win the select below
    rt.block_on(async move {
        let server_task = tokio::spawn(async move {
            if let Err(e) = server::run(cfg).await {
                error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
                Err(e)
            } else {
                Ok(())
            }
        });

        tokio::select! {
            res = server_task => {
                match res {
                    Ok(Ok(())) => {
                        info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
                        std::process::ExitCode::SUCCESS
                    }
                    // already logged inside the task
                    Ok(Err(_)) => std::process::ExitCode::FAILURE,
                    Err(e) => {
                        error!(service = "server", event = "task_join_error", error = %e, "server task join error");
                        std::process::ExitCode::FAILURE
                    }
                }
            }
            // no graceful drain: in-memory state is dropped with the process anyway
            _ = tokio::signal::ctrl_c() => {
                info!(service = "server", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
