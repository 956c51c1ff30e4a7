use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::error::{GeradorError, Result};
use crate::normalize::normalizar;

/// Converte um `Data` do calamine em String.
///
/// Números inteiros guardados como float ("6.0") viram "6"; células vazias
/// ou com erro viram string vazia.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Uma aba carregada: cabeçalho (primeira linha) + linhas de dados.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tabela {
    pub colunas: Vec<String>,
    pub linhas: Vec<Vec<String>>,
}

impl Tabela {
    pub fn indice_coluna(&self, nome: &str) -> Option<usize> {
        self.colunas.iter().position(|c| c == nome)
    }

    /// Valor da célula; linhas curtas devolvem string vazia.
    pub fn valor(&self, linha: usize, coluna: usize) -> &str {
        self.linhas
            .get(linha)
            .and_then(|l| l.get(coluna))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Lista as abas do workbook na ordem reportada pela biblioteca.
pub fn listar_abas<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names().to_owned())
}

/// Lê a aba `aba` do arquivo como `Tabela`.
///
/// Se a aba não existir, devolve `SheetNotFound` com as abas disponíveis e a
/// mais parecida (Jaro-Winkler sobre nomes normalizados).
pub fn ler_tabela<P: AsRef<Path>>(path: P, aba: &str) -> Result<Tabela> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(GeradorError::SourceFileNotFound(path.to_path_buf()));
    }
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_owned();

    if !names.iter().any(|s| s == aba) {
        let sugestao = aba_mais_parecida(aba, &names);
        return Err(GeradorError::SheetNotFound {
            aba: aba.to_string(),
            disponiveis: names,
            sugestao,
        });
    }

    let range = workbook.worksheet_range(aba)?;
    let mut rows = range.rows();
    let colunas: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => return Ok(Tabela::default()),
    };

    let mut linhas: Vec<Vec<String>> = Vec::new();
    for r in rows {
        let row_vec: Vec<String> = r.iter().map(cell_to_string).collect();
        if row_vec.iter().all(|c| c.is_empty()) {
            continue;
        }
        linhas.push(row_vec);
    }
    log::debug!("aba '{}' de {:?}: {} colunas, {} linhas", aba, path, colunas.len(), linhas.len());
    Ok(Tabela { colunas, linhas })
}

/// Nome de aba mais parecido com `pedido`, se algum passar do limiar.
pub fn aba_mais_parecida(pedido: &str, abas: &[String]) -> Option<String> {
    let alvo = normalizar(pedido);
    abas.iter()
        .map(|a| (a, strsim::jaro_winkler(&alvo, &normalizar(a))))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(a, _)| a.clone())
}
