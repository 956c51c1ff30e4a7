//! Parser tolerante do campo `fontes` (referências do guia).
//!
//! O campo chega de várias formas: ausente, lista de objetos, string JSON,
//! string JSON com aspas escapadas, vários objetos soltos separados por
//! vírgula, ou literal estilo Python (`{'fonte_nome': 'X'}`). Cada tentativa de
//! decodificação devolve `Decodificacao` (sem erro) e a cadeia segue para a
//! próxima; se nada funcionar o texto padrão é usado. `formatar_fontes` nunca
//! falha.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::error::GeradorError;
use crate::models::Fonte;

pub const FONTES_PADRAO: &str = "• Materiais didáticos\n\n• Plataformas digitais\n\n• Orientação do professor";
pub const SEM_FONTES: &str = "• Nenhuma fonte disponível";
pub const MAX_FONTES: usize = 5;

const CHAVES_NOME: [&str; 2] = ["fonte_nome", "nome"];
const CHAVES_DESCRICAO: [&str; 2] = ["descricao", "descrição"];
const CHAVES_LINK: [&str; 2] = ["link", "url"];

// strings que contêm JSON que contém JSON...
const MAX_ANINHAMENTO: usize = 3;

static RE_FRAGMENTO: OnceLock<Regex> = OnceLock::new();

fn re_fragmento() -> &'static Regex {
    RE_FRAGMENTO.get_or_init(|| Regex::new(r"\{[^{}]*\}").expect("regex literal"))
}

/// Formas possíveis do campo `fontes` na requisição.
#[derive(Debug, Clone, PartialEq)]
pub enum FontesEntrada {
    Ausente,
    Lista(Vec<Value>),
    Texto(String),
    Outro(Value),
}

impl FontesEntrada {
    /// Classifica o valor recebido. Valores "falsos" (null, "", [], {}, false, 0)
    /// contam como ausentes.
    pub fn from_value(valor: Option<&Value>) -> Self {
        match valor {
            None | Some(Value::Null) | Some(Value::Bool(false)) => FontesEntrada::Ausente,
            Some(Value::String(s)) if s.trim().is_empty() => FontesEntrada::Ausente,
            Some(Value::Array(v)) if v.is_empty() => FontesEntrada::Ausente,
            Some(Value::Object(m)) if m.is_empty() => FontesEntrada::Ausente,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => FontesEntrada::Ausente,
            Some(Value::String(s)) => FontesEntrada::Texto(s.clone()),
            Some(Value::Array(v)) => FontesEntrada::Lista(v.clone()),
            Some(other) => FontesEntrada::Outro(other.clone()),
        }
    }
}

/// Resultado de uma tentativa de decodificação.
#[derive(Debug, Clone, PartialEq)]
pub enum Decodificacao {
    Ok(Value),
    Falhou(String),
}

impl Decodificacao {
    fn ou_entao<F: FnOnce() -> Decodificacao>(self, proxima: F) -> Decodificacao {
        match self {
            Decodificacao::Ok(v) => Decodificacao::Ok(v),
            Decodificacao::Falhou(motivo) => {
                log::debug!("tentativa de decodificar fontes falhou: {}", motivo);
                proxima()
            }
        }
    }
}

/// Formata as fontes para o template. Nunca falha: qualquer problema vira
/// `FONTES_PADRAO`.
pub fn formatar_fontes(fontes: Option<&Value>) -> String {
    let entrada = FontesEntrada::from_value(fontes);
    if entrada == FontesEntrada::Ausente {
        return FONTES_PADRAO.to_string();
    }
    match extrair_fontes(&entrada) {
        Ok(lista) => formatar_lista(&lista),
        Err(e) => {
            log::warn!("{}; usando fontes padrão", e);
            FONTES_PADRAO.to_string()
        }
    }
}

/// Converte a entrada em fontes, na ordem recebida. Só os primeiros
/// `MAX_FONTES` registros são considerados; registros sem nome entre eles são
/// descartados e não abrem vaga para os seguintes. Só falha (`MalformedSourceData`) quando o texto não pôde ser
/// decodificado de forma alguma.
pub fn extrair_fontes(entrada: &FontesEntrada) -> Result<Vec<Fonte>, GeradorError> {
    let valor = match entrada {
        FontesEntrada::Ausente => return Ok(Vec::new()),
        FontesEntrada::Lista(v) => Value::Array(v.clone()),
        FontesEntrada::Outro(v) => v.clone(),
        FontesEntrada::Texto(s) => match decodificar_texto(s, 0) {
            Decodificacao::Ok(v) => v,
            Decodificacao::Falhou(motivo) => {
                return Err(GeradorError::MalformedSourceData(format!("{} (conteúdo original: {:?})", motivo, s)));
            }
        },
    };

    let elementos = match valor {
        Value::Array(v) => v,
        Value::Object(m) => vec![Value::Object(m)],
        other => {
            log::warn!("fontes decodificadas não são lista nem objeto: {}", other);
            Vec::new()
        }
    };

    Ok(elementos
        .into_iter()
        .filter_map(elemento_para_registro)
        .take(MAX_FONTES)
        .filter_map(|m| fonte_de_registro(&m))
        .collect())
}

/// Cadeia de decodificação de uma string: JSON cru, JSON sem aspas externas e
/// escapes, fragmentos `{...}` remontados em lista, e por fim literal estilo
/// Python sobre as mesmas variantes.
pub fn decodificar_texto(texto: &str, profundidade: usize) -> Decodificacao {
    let bruto = texto.trim();
    let limpo = limpar_aspas(bruto);
    let remontado = remontar_fragmentos(&limpo);

    let resultado = decodificar_estrito(bruto)
        .ou_entao(|| decodificar_estrito(&limpo))
        .ou_entao(|| match &remontado {
            Some(r) => decodificar_estrito(r),
            None => Decodificacao::Falhou("sem fragmentos para remontar".to_string()),
        })
        .ou_entao(|| decodificar_literal(&limpo))
        .ou_entao(|| match &remontado {
            Some(r) => decodificar_literal(r),
            None => Decodificacao::Falhou("nenhuma decodificação funcionou".to_string()),
        });

    match resultado {
        // JSON dentro de string JSON
        Decodificacao::Ok(Value::String(interno)) if profundidade < MAX_ANINHAMENTO && interno.trim() != bruto => {
            decodificar_texto(&interno, profundidade + 1)
        }
        Decodificacao::Ok(Value::String(_)) => {
            Decodificacao::Falhou("string não contém lista nem objeto".to_string())
        }
        outro => outro,
    }
}

/// Remove aspas externas iguais e desfaz `\"`.
pub fn limpar_aspas(texto: &str) -> String {
    let mut s = texto.trim();
    for aspa in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(aspa) && s.ends_with(aspa) {
            s = &s[1..s.len() - 1];
            break;
        }
    }
    s.replace("\\\"", "\"")
}

/// Se houver dois ou mais fragmentos `{...}`, monta `[frag1,frag2,...]`.
pub fn remontar_fragmentos(texto: &str) -> Option<String> {
    let fragmentos: Vec<&str> = re_fragmento().find_iter(texto).map(|m| m.as_str()).collect();
    if fragmentos.len() < 2 {
        return None;
    }
    Some(format!("[{}]", fragmentos.join(",")))
}

fn decodificar_estrito(texto: &str) -> Decodificacao {
    match serde_json::from_str::<Value>(texto) {
        Ok(v) => Decodificacao::Ok(v),
        Err(e) => Decodificacao::Falhou(format!("JSON inválido: {}", e)),
    }
}

/// Decodifica um literal estilo Python (aspas simples, True/False/None,
/// vírgula sobrando) reescrevendo-o como JSON.
fn decodificar_literal(texto: &str) -> Decodificacao {
    match literal_para_json(texto) {
        Some(json) => match serde_json::from_str::<Value>(&json) {
            Ok(v) => Decodificacao::Ok(v),
            Err(e) => Decodificacao::Falhou(format!("literal inválido: {}", e)),
        },
        None => Decodificacao::Falhou("literal com string não terminada".to_string()),
    }
}

fn literal_para_json(texto: &str) -> Option<String> {
    let mut out = String::with_capacity(texto.len());
    let mut chars = texto.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let fecha = c;
                out.push('"');
                let mut fechou = false;
                while let Some(d) = chars.next() {
                    match d {
                        '\\' => match chars.next() {
                            Some('\'') => out.push('\''),
                            Some(e) => {
                                out.push('\\');
                                out.push(e);
                            }
                            None => return None,
                        },
                        '"' if fecha == '\'' => out.push_str("\\\""),
                        d if d == fecha => {
                            fechou = true;
                            break;
                        }
                        '\n' => out.push_str("\\n"),
                        d => out.push(d),
                    }
                }
                if !fechou {
                    return None;
                }
                out.push('"');
            }
            c if c.is_ascii_alphabetic() => {
                let mut palavra = String::from(c);
                while let Some(&p) = chars.peek() {
                    if p.is_ascii_alphanumeric() || p == '_' {
                        palavra.push(p);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(match palavra.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    outra => outra,
                });
            }
            ']' | '}' => {
                let sem_espaco = out.trim_end().len();
                if out[..sem_espaco].ends_with(',') {
                    out.truncate(sem_espaco - 1);
                }
                out.push(c);
            }
            c => out.push(c),
        }
    }
    Some(out)
}

fn elemento_para_registro(elemento: Value) -> Option<Map<String, Value>> {
    match elemento {
        Value::Object(m) => Some(m),
        Value::String(s) => match serde_json::from_str::<Map<String, Value>>(s.trim()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("fonte ignorada (string não é objeto JSON: {}): {:?}", e, s);
                None
            }
        },
        other => {
            log::warn!("fonte ignorada (tipo não suportado): {}", other);
            None
        }
    }
}

fn campo_texto(registro: &Map<String, Value>, chaves: &[&str]) -> Option<String> {
    chaves.iter().find_map(|k| {
        let texto = match registro.get(*k)? {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        };
        if texto.is_empty() { None } else { Some(texto) }
    })
}

/// Registro → `Fonte`; sem nome utilizável, descarta.
pub fn fonte_de_registro(registro: &Map<String, Value>) -> Option<Fonte> {
    let nome = campo_texto(registro, &CHAVES_NOME)?;
    Some(Fonte {
        nome,
        descricao: campo_texto(registro, &CHAVES_DESCRICAO),
        link: campo_texto(registro, &CHAVES_LINK),
    })
}

/// Um bloco por fonte, separados por linha em branco.
pub fn formatar_lista(fontes: &[Fonte]) -> String {
    if fontes.is_empty() {
        return SEM_FONTES.to_string();
    }
    fontes
        .iter()
        .map(|f| {
            let mut item = format!("• {}", f.nome);
            if let Some(d) = &f.descricao {
                item.push_str(&format!("\n  Descrição: {}", d));
            }
            if let Some(l) = &f.link {
                item.push_str(&format!("\n  Link: {}", l));
            }
            item
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
