// Estruturas de dados principais

use serde::Serialize;

pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Uma linha da planilha de escopo-sequência, já com as colunas resolvidas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinhaAula {
    pub ano_serie: String,
    pub bimestre: String,
    pub titulo: String,
    pub conteudo: String,
    pub objetivos: String,
}

/// Uma fonte/referência do guia. Só existe com nome não vazio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fonte {
    pub nome: String,
    pub descricao: Option<String>,
    pub link: Option<String>,
}

/// Documento renderizado, ainda em memória.
#[derive(Debug, Clone)]
pub struct DocumentoGerado {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

/// Como o documento volta para quem chamou.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Saida {
    Base64 {
        file_base64: String,
        file_name: String,
        mime_type: String,
    },
    Arquivo {
        file_path: String,
        file_name: String,
        mime_type: String,
    },
}

impl Saida {
    pub fn file_name(&self) -> &str {
        match self {
            Saida::Base64 { file_name, .. } | Saida::Arquivo { file_name, .. } => file_name,
        }
    }
}
