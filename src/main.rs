// --- Gerador de documentos escolares - Arquivo principal ---

use geradocs::config::{nivel_log, AppConfig};
use geradocs::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(nivel_log())).init();

    let config = AppConfig::from_env();
    log::info!("=== Gerador de Documentos (API) ===");
    log::info!("Iniciando servidor em http://{} (log: {})", config.bind_addr, config.log_level);
    run_server(config).await
}
