//! Ementa de eletiva: só preenche o template, sem planilha.

use chrono::Local;

use super::saida::sanitizar_nome_arquivo;
use crate::api_json::EmentaRequest;
use crate::config::AppConfig;
use crate::docx::{renderizar_template, Contexto};
use crate::error::Result;
use crate::models::{DocumentoGerado, MIME_DOCX};

pub const TEMPLATE_EMENTA: &str = "template_eletivas_2025.docx";

pub fn contexto_ementa(req: &EmentaRequest, data_geracao: &str) -> Contexto {
    let ano_serie = if req.ano_serie.is_empty() {
        String::new()
    } else {
        format!(" - {}", req.ano_serie)
    };

    [
        ("TITULO", req.titulo.clone()),
        ("TEMA", req.tema.clone()),
        ("PROFESSOR1", req.professor1.clone()),
        ("PROFESSOR2", req.professor2.clone()),
        ("ANO_SERIE", ano_serie),
        ("JUSTIFICATIVA", req.justificativa.clone()),
        ("OBJETIVO", req.objetivo.clone()),
        ("HABILIDADES", req.habilidades.clone()),
        ("CONTEUDO", req.conteudo.clone()),
        ("METODOLOGIA", req.metodologia.clone()),
        ("RECURSOS", req.recursos.clone()),
        ("CULMINANCIA", req.culminancia.clone()),
        ("REFERENCIA", req.referencia.clone()),
        ("DATA_GERACAO", data_geracao.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

pub fn nome_arquivo_ementa(titulo: &str) -> String {
    format!("EMENTA_{}.docx", sanitizar_nome_arquivo(titulo))
}

pub fn gerar_ementa(cfg: &AppConfig, req: &EmentaRequest) -> Result<DocumentoGerado> {
    let template = cfg.templates_dir().join(TEMPLATE_EMENTA);
    let agora = Local::now().format("%d/%m/%Y %H:%M").to_string();
    let contexto = contexto_ementa(req, &agora);

    let bytes = renderizar_template(&template, &contexto)?;
    Ok(DocumentoGerado {
        bytes,
        file_name: nome_arquivo_ementa(&req.titulo),
        mime_type: MIME_DOCX,
    })
}
