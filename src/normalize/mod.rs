//! Normalização de texto para comparações "frouxas".
//!
//! - `normalizar_texto`: minúsculas, sem acentos, sem espaços nas pontas
//! - `extrair_numero_serie`: primeiro número de textos como "6º ano", "2º bimestre"
//! - `chave_busca`: número extraído ou, na falta dele, o texto normalizado

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

static RE_ANO: OnceLock<Regex> = OnceLock::new();
static RE_NUMERO: OnceLock<Regex> = OnceLock::new();

fn re_ano() -> &'static Regex {
    RE_ANO.get_or_init(|| Regex::new(r"(?i)ano\s*").expect("regex literal"))
}

fn re_numero() -> &'static Regex {
    RE_NUMERO.get_or_init(|| Regex::new(r"(\d+)\s*[°ºª]?\s*").expect("regex literal"))
}

/// Remove acentos (decomposição NFKD + descarte do que não for ASCII),
/// passa para minúsculas e corta espaços. `None` vira string vazia.
///
/// Idempotente: o resultado é ASCII minúsculo sem espaços nas pontas.
pub fn normalizar_texto(texto: Option<&str>) -> String {
    let Some(texto) = texto else {
        return String::new();
    };
    let ascii: String = texto.nfkd().filter(char::is_ascii).collect();
    if ascii.is_empty() && !texto.trim().is_empty() && texto.chars().any(char::is_alphanumeric) {
        log::warn!("texto sem representação ASCII ao normalizar: {:?}", texto);
    }
    ascii.to_lowercase().trim().to_string()
}

/// Atalho para `normalizar_texto(Some(texto))`.
pub fn normalizar(texto: &str) -> String {
    normalizar_texto(Some(texto))
}

/// Extrai o número da série/ano/bimestre.
///
/// Remove "ano" (qualquer caixa) e devolve a primeira sequência de dígitos,
/// ou string vazia se não houver.
pub fn extrair_numero_serie(texto: &str) -> String {
    let sem_ano = re_ano().replace_all(texto.trim(), "");
    re_numero()
        .captures(&sem_ano)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Chave usada para casar ano/série e bimestre: o número quando existe,
/// senão o texto normalizado (aceita bimestres não numéricos).
pub fn chave_busca(texto: &str) -> String {
    let numero = extrair_numero_serie(texto);
    if numero.is_empty() { normalizar(texto) } else { numero }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normaliza_acentos_e_caixa() {
        assert_eq!(normalizar("  Título da AULA "), "titulo da aula");
        assert_eq!(normalizar("CONTEÚDO"), "conteudo");
        assert_eq!(normalizar("Período"), "periodo");
        assert_eq!(normalizar_texto(None), "");
    }

    #[test]
    fn normalizacao_idempotente() {
        for s in ["Ação", "6º ANO", "  Ensino Médio  ", "", "ÇÃÕ ü", "日本"] {
            let uma = normalizar(s);
            assert_eq!(normalizar(&uma), uma, "falhou para {:?}", s);
        }
    }

    #[test]
    fn extrai_numero_com_ordinais() {
        assert_eq!(extrair_numero_serie("6º ano"), "6");
        assert_eq!(extrair_numero_serie("6 ano"), "6");
        assert_eq!(extrair_numero_serie("6ª"), "6");
        assert_eq!(extrair_numero_serie("3ª série"), "3");
        assert_eq!(extrair_numero_serie("2º Bimestre"), "2");
        assert_eq!(extrair_numero_serie("ANO 9"), "9");
        assert_eq!(extrair_numero_serie("sem número"), "");
        assert_eq!(extrair_numero_serie(""), "");
    }

    #[test]
    fn chave_cai_para_texto_normalizado() {
        assert_eq!(chave_busca("1º Bimestre"), "1");
        assert_eq!(chave_busca("Recuperação"), "recuperacao");
    }
}
