//! Resolução de colunas por sinônimos e conversão das linhas em `LinhaAula`.
//!
//! As planilhas de escopo-sequência não têm cabeçalhos padronizados
//! ("ANO/SÉRIE", "Ano", "Série"...). Cada campo tem uma lista de sinônimos e
//! um nome canônico usado como último recurso.

use crate::error::{GeradorError, Result};
use crate::excel::io::Tabela;
use crate::models::LinhaAula;
use crate::normalize::normalizar;

/// Campo lógico da planilha, com seus sinônimos de cabeçalho.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campo {
    AnoSerie,
    Bimestre,
    Titulo,
    Conteudo,
    Objetivos,
}

impl Campo {
    pub const TODOS: [Campo; 5] = [
        Campo::AnoSerie,
        Campo::Bimestre,
        Campo::Titulo,
        Campo::Conteudo,
        Campo::Objetivos,
    ];

    pub fn sinonimos(self) -> &'static [&'static str] {
        match self {
            Campo::AnoSerie => &["ANO/SÉRIE", "ANO", "SÉRIE", "ANO SERIE"],
            Campo::Bimestre => &["BIMESTRE", "BIM", "PERÍODO"],
            Campo::Titulo => &["TÍTULO DA AULA", "TITULO", "NOME DA AULA"],
            Campo::Conteudo => &["CONTEÚDO", "CONTEUDO", "MATÉRIA", "ASSUNTO"],
            Campo::Objetivos => &["OBJETIVOS", "OBJETIVO", "METAS"],
        }
    }

    /// Nome assumido quando nenhum sinônimo casa.
    pub fn nome_canonico(self) -> &'static str {
        match self {
            Campo::AnoSerie => "AnoSerie",
            Campo::Bimestre => "Bimestre",
            Campo::Titulo => "Titulo",
            Campo::Conteudo => "Conteudo",
            Campo::Objetivos => "Objetivos",
        }
    }
}

/// Primeira coluna (na ordem da tabela) cujo nome normalizado contém algum
/// dos sinônimos normalizados.
pub fn encontrar_coluna<'a>(colunas: &'a [String], sinonimos: &[&str]) -> Option<&'a str> {
    let padroes: Vec<String> = sinonimos.iter().map(|p| normalizar(p)).filter(|p| !p.is_empty()).collect();
    colunas
        .iter()
        .find(|col| {
            let col_norm = normalizar(col);
            padroes.iter().any(|p| col_norm.contains(p.as_str()))
        })
        .map(String::as_str)
}

/// Índice da coluna do campo: por sinônimo, senão pelo nome canônico exato.
pub fn resolver_coluna(tabela: &Tabela, campo: Campo) -> Result<usize> {
    let nome = encontrar_coluna(&tabela.colunas, campo.sinonimos()).unwrap_or(campo.nome_canonico());
    tabela.indice_coluna(nome).ok_or_else(|| GeradorError::ColumnNotFound {
        coluna: campo.nome_canonico().to_string(),
        disponiveis: tabela.colunas.clone(),
    })
}

/// Converte a tabela em linhas de aula, falhando se alguma coluna obrigatória
/// não puder ser resolvida.
pub fn mapear_linhas(tabela: &Tabela) -> Result<Vec<LinhaAula>> {
    let mut idx = [0usize; 5];
    for (i, campo) in Campo::TODOS.iter().enumerate() {
        idx[i] = resolver_coluna(tabela, *campo)?;
    }
    log::debug!(
        "colunas resolvidas: {:?}",
        Campo::TODOS.iter().zip(idx.iter()).map(|(c, i)| (c.nome_canonico(), &tabela.colunas[*i])).collect::<Vec<_>>()
    );

    Ok((0..tabela.linhas.len())
        .map(|l| LinhaAula {
            ano_serie: tabela.valor(l, idx[0]).to_string(),
            bimestre: tabela.valor(l, idx[1]).to_string(),
            titulo: tabela.valor(l, idx[2]).to_string(),
            conteudo: tabela.valor(l, idx[3]).to_string(),
            objetivos: tabela.valor(l, idx[4]).to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn casa_sinonimo_sem_acento_nem_caixa() {
        let c = cols(&["Título da Aula"]);
        assert_eq!(encontrar_coluna(&c, &["TITULO", "NOME DA AULA"]), Some("Título da Aula"));
    }

    #[test]
    fn ordem_das_colunas_decide() {
        let c = cols(&["Série", "Ano/Série"]);
        assert_eq!(encontrar_coluna(&c, Campo::AnoSerie.sinonimos()), Some("Série"));
        assert_eq!(encontrar_coluna(&c, &["BIMESTRE"]), None);
    }

    #[test]
    fn aceita_nomes_canonicos() {
        let t = Tabela {
            colunas: cols(&["AnoSerie", "Bim.", "Titulo", "Conteudo", "Objetivos"]),
            linhas: vec![],
        };
        assert_eq!(resolver_coluna(&t, Campo::AnoSerie).unwrap(), 0);
        assert_eq!(resolver_coluna(&t, Campo::Bimestre).unwrap(), 1);
    }

    #[test]
    fn coluna_ausente_lista_disponiveis() {
        let t = Tabela { colunas: cols(&["Série", "Bimestre", "Título"]), linhas: vec![] };
        match resolver_coluna(&t, Campo::Conteudo) {
            Err(GeradorError::ColumnNotFound { coluna, disponiveis }) => {
                assert_eq!(coluna, "Conteudo");
                assert_eq!(disponiveis.len(), 3);
            }
            other => panic!("esperava ColumnNotFound, veio {:?}", other),
        }
    }

    #[test]
    fn mapeia_linhas_curtas() {
        let t = Tabela {
            colunas: cols(&["Ano/Série", "Bimestre", "Título da aula", "Conteúdo", "Objetivos"]),
            linhas: vec![cols(&["6º ano", "1º", "Frações"])],
        };
        let linhas = mapear_linhas(&t).unwrap();
        assert_eq!(linhas[0].titulo, "Frações");
        assert_eq!(linhas[0].objetivos, "");
    }
}
