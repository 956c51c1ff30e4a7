// Biblioteca raiz do crate `geradocs`.
// Gera agendas, guias de aprendizagem e ementas de eletivas a partir das
// planilhas de escopo-sequência e dos templates em `complementos/`.
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod docx;
pub mod error;
pub mod excel;
pub mod geradores;
pub mod models;
pub mod normalize;
pub mod server;
mod server_handlers;

pub use error::{GeradorError, Result};
/// Executa o servidor HTTP (reexport usado por `main`)
pub use server::run_server;
