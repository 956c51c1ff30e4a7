//! Montadores de documentos.
//!
//! - `agenda`: agenda mensal `.xlsx`
//! - `guia`: guia de aprendizagem `.docx` a partir da planilha do ciclo
//! - `ementa`: ementa de eletiva `.docx`
//! - `saida`: nomes de arquivo e entrega (base64 ou disco)

pub mod agenda;
pub mod ementa;
pub mod guia;
pub mod saida;

pub use agenda::criar_agenda;
pub use ementa::gerar_ementa;
pub use guia::gerar_guia;
pub use saida::{entregar, sanitizar_nome_arquivo, MIN_DOCUMENT_BYTES};

pub const SUBDIR_AGENDAS: &str = "agendas";
pub const SUBDIR_GUIAS: &str = "guias";
pub const SUBDIR_EMENTAS: &str = "ementas";
