//! Filtro das linhas da planilha por ano/série e bimestre.
//!
//! O casamento é por substring sobre chaves normalizadas: "6" casa com linhas
//! "6º ano" e também com "6/7" (turmas combinadas). Também casa "1" com "10";
//! esse falso positivo é aceito.

use crate::error::{GeradorError, Result};
use crate::models::LinhaAula;
use crate::normalize::{chave_busca, extrair_numero_serie};

/// Seleciona as linhas do ano/série e bimestre pedidos que tenham título.
///
/// Falha com `InvalidFilterValue` se o ano/série não tiver número. Resultado
/// vazio não é erro aqui: só é registrado no log com os valores distintos da
/// planilha, e quem chamou decide.
pub fn filtrar_linhas<'a>(linhas: &'a [LinhaAula], ano_serie: &str, bimestre: &str) -> Result<Vec<&'a LinhaAula>> {
    let numero_serie = extrair_numero_serie(ano_serie);
    if numero_serie.is_empty() {
        return Err(GeradorError::InvalidFilterValue {
            campo: "Ano/Série".to_string(),
            valor: ano_serie.to_string(),
        });
    }
    let bimestre_busca = chave_busca(bimestre);

    let resultado: Vec<&LinhaAula> = linhas
        .iter()
        .filter(|l| chave_busca(&l.ano_serie).contains(&numero_serie))
        .filter(|l| chave_busca(&l.bimestre).contains(&bimestre_busca))
        .filter(|l| !l.titulo.trim().is_empty())
        .collect();

    if resultado.is_empty() {
        log::warn!("Nenhum dado encontrado com os filtros:");
        log::warn!(
            "Ano/Série buscado: {} | Valores únicos na planilha: {:?}",
            numero_serie,
            valores_distintos(linhas, |l| &l.ano_serie)
        );
        log::warn!(
            "Bimestre buscado: {} | Valores únicos na planilha: {:?}",
            bimestre_busca,
            valores_distintos(linhas, |l| &l.bimestre)
        );
    }

    Ok(resultado)
}

/// Valores brutos distintos de um campo, na ordem em que aparecem.
pub fn valores_distintos<F>(linhas: &[LinhaAula], campo: F) -> Vec<String>
where
    F: Fn(&LinhaAula) -> &String,
{
    let mut vistos: Vec<String> = Vec::new();
    for l in linhas {
        let v = campo(l);
        if !vistos.iter().any(|x| x == v) {
            vistos.push(v.clone());
        }
    }
    vistos
}
