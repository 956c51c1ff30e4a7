//! Erros do gerador de documentos.
//!
//! Todas as falhas de geração passam por `GeradorError`. A camada HTTP usa
//! `kind()` como identificador legível por máquina e `details()` para anexar o
//! contexto de diagnóstico (abas disponíveis, colunas, valores distintos).

use serde_json::{json, Value};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeradorError>;

#[derive(Debug, Error)]
pub enum GeradorError {
    #[error("Parâmetros obrigatórios faltando: {}", .0.join(", "))]
    MissingParameter(Vec<String>),

    #[error("Parâmetro inválido '{param}': {motivo}")]
    InvalidParameter { param: String, motivo: String },

    #[error("Formato inválido para {campo}: '{valor}'")]
    InvalidFilterValue { campo: String, valor: String },

    #[error("Coluna obrigatória '{coluna}' não encontrada")]
    ColumnNotFound {
        coluna: String,
        disponiveis: Vec<String>,
    },

    #[error("Erro ao acessar aba '{aba}'. Abas disponíveis: {}", .disponiveis.join(", "))]
    SheetNotFound {
        aba: String,
        disponiveis: Vec<String>,
        sugestao: Option<String>,
    },

    #[error("Template não encontrado em: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Planilha não encontrada em: {}", .0.display())]
    SourceFileNotFound(PathBuf),

    #[error(
        "Nenhum dado encontrado para: Disciplina={disciplina}, Ano/Série={ano_serie}, Bimestre={bimestre}"
    )]
    NoMatchingRows {
        disciplina: String,
        ano_serie: String,
        bimestre: String,
        valores_ano_serie: Vec<String>,
        valores_bimestre: Vec<String>,
    },

    /// Só existe dentro do parser de fontes; nunca chega à camada HTTP.
    #[error("Fontes em formato inválido: {0}")]
    MalformedSourceData(String),

    #[error("Arquivo gerado é muito pequeno ({bytes} bytes, mínimo {minimo})")]
    GenerationTooSmall { bytes: usize, minimo: usize },

    #[error("Erro de planilha: {0}")]
    Spreadsheet(String),

    #[error("Erro ao renderizar documento: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GeradorError {
    /// Nome estável do tipo de erro, usado no campo `kind` das respostas.
    pub fn kind(&self) -> &'static str {
        match self {
            GeradorError::MissingParameter(_) => "MissingParameter",
            GeradorError::InvalidParameter { .. } => "InvalidParameter",
            GeradorError::InvalidFilterValue { .. } => "InvalidFilterValue",
            GeradorError::ColumnNotFound { .. } => "ColumnNotFound",
            GeradorError::SheetNotFound { .. } => "SheetNotFound",
            GeradorError::TemplateNotFound(_) => "TemplateNotFound",
            GeradorError::SourceFileNotFound(_) => "SourceFileNotFound",
            GeradorError::NoMatchingRows { .. } => "NoMatchingRows",
            GeradorError::MalformedSourceData(_) => "MalformedSourceData",
            GeradorError::GenerationTooSmall { .. } => "GenerationTooSmall",
            GeradorError::Spreadsheet(_) => "SpreadsheetError",
            GeradorError::Render(_) => "RenderError",
            GeradorError::Io(_) => "IoError",
        }
    }

    /// Contexto extra de diagnóstico, quando o erro tem algum.
    pub fn details(&self) -> Option<Value> {
        match self {
            GeradorError::MissingParameter(faltando) => Some(json!({"missing": faltando})),
            GeradorError::ColumnNotFound { coluna, disponiveis } => Some(json!({
                "coluna": coluna,
                "colunas_disponiveis": disponiveis,
            })),
            GeradorError::SheetNotFound { aba, disponiveis, sugestao } => Some(json!({
                "aba": aba,
                "abas_disponiveis": disponiveis,
                "sugestao": sugestao,
            })),
            GeradorError::NoMatchingRows { valores_ano_serie, valores_bimestre, .. } => Some(json!({
                "formatos_aceitos_ano_serie": ["6°", "6° ano", "6ª", "6"],
                "valores_ano_serie": valores_ano_serie,
                "valores_bimestre": valores_bimestre,
            })),
            GeradorError::TemplateNotFound(p) | GeradorError::SourceFileNotFound(p) => {
                Some(json!({"path": p.to_string_lossy()}))
            }
            _ => None,
        }
    }
}

impl From<calamine::Error> for GeradorError {
    fn from(e: calamine::Error) -> Self {
        GeradorError::Spreadsheet(e.to_string())
    }
}

impl From<zip::result::ZipError> for GeradorError {
    fn from(e: zip::result::ZipError) -> Self {
        GeradorError::Render(format!("zip: {}", e))
    }
}

impl From<quick_xml::Error> for GeradorError {
    fn from(e: quick_xml::Error) -> Self {
        GeradorError::Render(format!("xml: {}", e))
    }
}
