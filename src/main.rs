use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::Notify;

use loom_devserver::config::{self, AppState};
use loom_devserver::error::StartupError;
use loom_devserver::{logger, server};

/// Development server for Loom4: serves the current directory over HTTP
#[derive(Parser, Debug)]
#[command(name = "loom-devserver")]
struct Cli {
    /// TCP port to listen on
    #[arg(value_name = "PORT")]
    port: Option<u16>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.port) {
        Ok(()) => ExitCode::SUCCESS,
        Err(StartupError::AddrInUse { port }) => {
            logger::log_port_in_use(port);
            ExitCode::FAILURE
        }
        Err(e) => {
            logger::log_startup_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(port: Option<u16>) -> Result<(), StartupError> {
    let cfg = config::Config::load(port)?;
    let document_root = std::env::current_dir()?;
    let state = Arc::new(AppState::new(cfg, &document_root)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(state))
}

async fn async_main(state: Arc<AppState>) -> Result<(), StartupError> {
    let addr = state.config.get_socket_addr().map_err(StartupError::Addr)?;

    logger::log_server_start(&state.document_root, addr.port());

    let listener = server::create_listener(addr).map_err(|e| StartupError::from_bind(addr, e))?;
    logger::log_server_started(addr.port());

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    server::start_server_loop(listener, state, shutdown).await;

    logger::log_shutdown();
    Ok(())
}
