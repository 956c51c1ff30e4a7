//! Guia de aprendizagem: planilha do ciclo → filtro → template.

use std::path::PathBuf;

use crate::algorithm::{filtrar_linhas, formatar_fontes, formatar_secao, valores_distintos};
use crate::api_json::GuiaRequest;
use crate::config::AppConfig;
use crate::docx::{renderizar_template, Contexto};
use crate::error::{GeradorError, Result};
use crate::excel::{ler_tabela, mapear_linhas};
use crate::models::{DocumentoGerado, MIME_DOCX};

pub const TEMPLATE_GUIA: &str = "template_guia_aprendizagem_2025.docx";

/// Planilha de escopo-sequência de cada ciclo (1, 2, 3).
pub static PLANILHAS_CICLO: [&str; 3] = [
    "1. Anos Iniciais - Escopo-sequência 2025.xlsx",
    "2. Anos Finais - Escopo-sequência 2025.xlsx",
    "3. Ensino Médio - Escopo-sequência 2025.xlsx",
];

pub fn planilha_do_ciclo(cfg: &AppConfig, ciclo: u8) -> Result<PathBuf> {
    match ciclo {
        1..=3 => Ok(cfg.dados_dir().join(PLANILHAS_CICLO[(ciclo - 1) as usize])),
        _ => Err(GeradorError::InvalidParameter {
            param: "ciclo".to_string(),
            motivo: format!("deve ser 1, 2 ou 3, recebido {}", ciclo),
        }),
    }
}

pub fn nome_arquivo_guia(req: &GuiaRequest) -> String {
    let nome = format!(
        "Guia_{}_{}_Bim{}_{}.docx",
        super::saida::prefixo(&req.professor, 20).replace(' ', "_"),
        req.ano_serie.replace(' ', ""),
        req.bimestre,
        super::saida::prefixo(&req.disciplina, 30).replace(' ', "_"),
    );
    nome.replace(['/', '\\'], "_")
}

pub fn gerar_guia(cfg: &AppConfig, req: &GuiaRequest) -> Result<DocumentoGerado> {
    let template = cfg.templates_dir().join(TEMPLATE_GUIA);
    if !template.is_file() {
        return Err(GeradorError::TemplateNotFound(template));
    }
    let planilha = planilha_do_ciclo(cfg, req.ciclo)?;

    // a aba tem o nome da disciplina
    let tabela = ler_tabela(&planilha, &req.disciplina)?;
    let linhas = mapear_linhas(&tabela)?;
    log::debug!("aba '{}': {} linhas", req.disciplina, linhas.len());

    let filtradas = filtrar_linhas(&linhas, &req.ano_serie, &req.bimestre)?;
    if filtradas.is_empty() {
        return Err(GeradorError::NoMatchingRows {
            disciplina: req.disciplina.clone(),
            ano_serie: req.ano_serie.clone(),
            bimestre: req.bimestre.clone(),
            valores_ano_serie: valores_distintos(&linhas, |l| &l.ano_serie),
            valores_bimestre: valores_distintos(&linhas, |l| &l.bimestre),
        });
    }

    let mut contexto = Contexto::new();
    contexto.insert("Professor".into(), req.professor.clone());
    contexto.insert("Disciplina".into(), req.disciplina.clone());
    contexto.insert("AnoSerie".into(), req.ano_serie.clone());
    contexto.insert("Bimestre".into(), req.bimestre.clone());
    contexto.insert("Titulo".into(), formatar_secao(filtradas.iter().map(|l| &l.titulo)));
    contexto.insert("Conteudo".into(), formatar_secao(filtradas.iter().map(|l| &l.conteudo)));
    contexto.insert("Objetivos".into(), formatar_secao(filtradas.iter().map(|l| &l.objetivos)));
    contexto.insert("Fontes".into(), formatar_fontes(req.fontes.as_ref()));

    let bytes = renderizar_template(&template, &contexto)?;
    Ok(DocumentoGerado {
        bytes,
        file_name: nome_arquivo_guia(req),
        mime_type: MIME_DOCX,
    })
}
