use actix_web::web;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::error::{GeradorError, Result};

/// Parâmetros de uma requisição de geração, já mesclados.
///
/// Ordem de precedência: corpo JSON (ou formulário urlencoded) sobrescreve a
/// query string, inclusive entre apelidos (`month` no corpo vence `mes` na
/// query). Campos numéricos aceitam número ou string numérica; cada campo pode
/// ter apelidos (ex.: `mes` / `month`).
///
/// # Exemplo
/// ```json
/// {
///   "professor": "Maria Silva",
///   "disciplina": "Matemática",
///   "ano_serie": "6º ano",
///   "bimestre": "1",
///   "ciclo": 2,
///   "fontes": [{"fonte_nome": "Livro X", "link": "http://..."}],
///   "return_base64": true
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parametros {
    valores: Map<String, Value>,
    // chaves que vieram do corpo
    do_corpo: HashSet<String>,
}

impl Parametros {
    /// Todos os valores contam como vindos do corpo.
    pub fn from_map(valores: Map<String, Value>) -> Self {
        let do_corpo = valores.keys().cloned().collect();
        Parametros { valores, do_corpo }
    }

    /// Mescla query string e corpo. Corpo JSON que não seja objeto é ignorado;
    /// corpo que não é JSON é lido como formulário.
    pub fn from_partes(query: &str, corpo: &[u8]) -> Self {
        let mut valores = Map::new();
        for (k, v) in decodificar_form(query) {
            valores.insert(k, Value::String(v));
        }

        let mut do_corpo = HashSet::new();
        if !corpo.iter().all(u8::is_ascii_whitespace) {
            match serde_json::from_slice::<Value>(corpo) {
                Ok(Value::Object(obj)) => {
                    for (k, v) in obj {
                        do_corpo.insert(k.clone());
                        valores.insert(k, v);
                    }
                }
                Ok(outro) => log::warn!("corpo JSON ignorado (não é objeto): {}", outro),
                Err(e) => {
                    log::debug!("falha ao ler JSON, tentando formulário: {}", e);
                    let texto = String::from_utf8_lossy(corpo);
                    for (k, v) in decodificar_form(&texto) {
                        do_corpo.insert(k.clone());
                        valores.insert(k, Value::String(v));
                    }
                }
            }
        }

        Parametros { valores, do_corpo }
    }

    /// Cópia dos parâmetros recebidos, para eco nas respostas de erro.
    pub fn recebidos(&self) -> Value {
        Value::Object(self.valores.clone())
    }

    /// Primeiro valor não nulo entre os apelidos; apelidos vindos do corpo
    /// têm prioridade sobre os da query.
    pub fn valor(&self, nomes: &[&str]) -> Option<&Value> {
        let busca = |do_corpo: bool| {
            nomes
                .iter()
                .filter(|n| self.do_corpo.contains(**n) == do_corpo)
                .filter_map(|n| self.valores.get(*n))
                .find(|v| !v.is_null())
        };
        busca(true).or_else(|| busca(false))
    }

    /// Texto não vazio (após trim). Números e booleanos viram texto.
    pub fn texto(&self, nomes: &[&str]) -> Option<String> {
        let texto = match self.valor(nomes)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        if texto.is_empty() { None } else { Some(texto) }
    }

    pub fn inteiro(&self, nomes: &[&str]) -> Result<Option<i64>> {
        let Some(v) = self.valor(nomes) else {
            return Ok(None);
        };
        let invalido = || GeradorError::InvalidParameter {
            param: nomes[0].to_string(),
            motivo: format!("esperado número inteiro, recebido {}", v),
        };
        match v {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Some(i))
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
                        _ => Err(invalido()),
                    }
                }
            }
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s.trim().parse::<i64>().map(Some).map_err(|_| invalido()),
            _ => Err(invalido()),
        }
    }

    pub fn booleano(&self, nomes: &[&str]) -> Result<Option<bool>> {
        let Some(v) = self.valor(nomes) else {
            return Ok(None);
        };
        match v {
            Value::Bool(b) => Ok(Some(*b)),
            Value::Number(n) => Ok(Some(n.as_f64().unwrap_or(0.0) != 0.0)),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "" => Ok(None),
                "true" | "1" | "sim" | "yes" => Ok(Some(true)),
                "false" | "0" | "nao" | "não" | "no" => Ok(Some(false)),
                _ => Err(GeradorError::InvalidParameter {
                    param: nomes[0].to_string(),
                    motivo: format!("esperado booleano, recebido '{}'", s),
                }),
            },
            outro => Err(GeradorError::InvalidParameter {
                param: nomes[0].to_string(),
                motivo: format!("esperado booleano, recebido {}", outro),
            }),
        }
    }

    /// Texto dentro de um objeto aninhado (ex.: `professores.professor1`).
    pub fn texto_aninhado(&self, objeto: &str, campo: &str) -> Option<String> {
        match self.valores.get(objeto)?.get(campo)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    fn return_base64(&self) -> Result<bool> {
        Ok(self.booleano(&["return_base64"])?.unwrap_or(true))
    }
}

fn decodificar_form(texto: &str) -> HashMap<String, String> {
    if texto.trim().is_empty() {
        return HashMap::new();
    }
    match web::Query::<HashMap<String, String>>::from_query(texto) {
        Ok(q) => q.into_inner(),
        Err(e) => {
            log::debug!("parâmetros urlencoded inválidos: {}", e);
            HashMap::new()
        }
    }
}

/// Acumula os obrigatórios ausentes para reportar todos de uma vez.
struct Obrigatorios<'a> {
    params: &'a Parametros,
    faltando: Vec<String>,
}

impl<'a> Obrigatorios<'a> {
    fn new(params: &'a Parametros) -> Self {
        Obrigatorios { params, faltando: Vec::new() }
    }

    fn texto(&mut self, nomes: &[&str]) -> String {
        match self.params.texto(nomes) {
            Some(t) => t,
            None => {
                self.faltando.push(nomes[0].to_string());
                String::new()
            }
        }
    }

    fn inteiro(&mut self, nomes: &[&str]) -> Result<i64> {
        match self.params.inteiro(nomes)? {
            Some(i) => Ok(i),
            None => {
                self.faltando.push(nomes[0].to_string());
                Ok(0)
            }
        }
    }

    fn finalizar(self) -> Result<()> {
        if self.faltando.is_empty() {
            Ok(())
        } else {
            Err(GeradorError::MissingParameter(self.faltando))
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgendaRequest {
    pub mes: u32,
    pub ano: i32,
    pub professor: String,
    pub return_base64: bool,
}

impl AgendaRequest {
    pub fn from_params(p: &Parametros) -> Result<Self> {
        let mut req = Obrigatorios::new(p);
        let mes = req.inteiro(&["mes", "month"])?;
        let ano = req.inteiro(&["ano", "year"])?;
        let professor = req.texto(&["professor"]);
        req.finalizar()?;

        if !(1..=12).contains(&mes) {
            return Err(GeradorError::InvalidParameter {
                param: "mes".to_string(),
                motivo: format!("deve estar entre 1 e 12, recebido {}", mes),
            });
        }
        let ano = i32::try_from(ano).map_err(|_| GeradorError::InvalidParameter {
            param: "ano".to_string(),
            motivo: format!("fora do intervalo: {}", ano),
        })?;

        Ok(AgendaRequest {
            mes: mes as u32,
            ano,
            professor,
            return_base64: p.return_base64()?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GuiaRequest {
    pub professor: String,
    pub disciplina: String,
    pub ano_serie: String,
    pub bimestre: String,
    pub ciclo: u8,
    /// Valor cru; o parser de fontes lida com qualquer formato.
    pub fontes: Option<Value>,
    pub return_base64: bool,
}

impl GuiaRequest {
    pub fn from_params(p: &Parametros) -> Result<Self> {
        let mut req = Obrigatorios::new(p);
        let professor = req.texto(&["professor"]);
        let disciplina = req.texto(&["disciplina", "subject"]);
        let ano_serie = req.texto(&["ano_serie", "grade"]);
        let bimestre = req.texto(&["bimestre", "term"]);
        let ciclo = req.inteiro(&["ciclo", "cycle"])?;
        req.finalizar()?;

        if !(1..=3).contains(&ciclo) {
            return Err(GeradorError::InvalidParameter {
                param: "ciclo".to_string(),
                motivo: format!("deve ser 1, 2 ou 3, recebido {}", ciclo),
            });
        }

        Ok(GuiaRequest {
            professor,
            disciplina,
            ano_serie,
            bimestre,
            ciclo: ciclo as u8,
            fontes: p.valor(&["fontes", "sources"]).cloned(),
            return_base64: p.return_base64()?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmentaRequest {
    pub titulo: String,
    pub tema: String,
    pub professor1: String,
    pub professor2: String,
    pub ano_serie: String,
    pub justificativa: String,
    pub objetivo: String,
    pub habilidades: String,
    pub conteudo: String,
    pub metodologia: String,
    pub recursos: String,
    pub culminancia: String,
    pub referencia: String,
    pub return_base64: bool,
}

impl EmentaRequest {
    pub fn from_params(p: &Parametros) -> Result<Self> {
        let professor1 = p
            .texto(&["professor1"])
            .or_else(|| p.texto_aninhado("professores", "professor1"));
        let professor2 = p
            .texto(&["professor2"])
            .or_else(|| p.texto_aninhado("professores", "professor2"));

        let mut req = Obrigatorios::new(p);
        let titulo = req.texto(&["titulo", "title"]);
        let tema = req.texto(&["tema", "theme"]);
        if professor1.is_none() {
            req.faltando.push("professor1".to_string());
        }
        let justificativa = req.texto(&["justificativa", "justification"]);
        let objetivo = req.texto(&["objetivo", "objective"]);
        req.finalizar()?;

        let opcional = |nomes: &[&str]| p.texto(nomes).unwrap_or_default();
        Ok(EmentaRequest {
            titulo,
            tema,
            professor1: professor1.unwrap_or_default(),
            professor2: professor2.unwrap_or_default(),
            ano_serie: opcional(&["ano_serie", "grade"]),
            justificativa,
            objetivo,
            habilidades: opcional(&["habilidades", "skills"]),
            conteudo: opcional(&["conteudo", "content"]),
            metodologia: opcional(&["metodologia", "methodology"]),
            recursos: opcional(&["recursos", "resources"]),
            culminancia: opcional(&["culminancia", "culmination"]),
            referencia: opcional(&["referencia", "references"]),
            return_base64: p.return_base64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(v: Value) -> Parametros {
        match v {
            Value::Object(m) => Parametros::from_map(m),
            _ => panic!("fixture deve ser objeto"),
        }
    }

    #[test]
    fn corpo_sobrescreve_query() {
        let p = Parametros::from_partes("mes=1&ano=2024&professor=Ana", br#"{"mes": 2}"#);
        let req = AgendaRequest::from_params(&p).unwrap();
        assert_eq!(req.mes, 2);
        assert_eq!(req.ano, 2024);
        assert_eq!(req.professor, "Ana");
        assert!(req.return_base64);
    }

    #[test]
    fn apelido_no_corpo_vence_query() {
        let p = Parametros::from_partes("mes=1&ano=2024", br#"{"month": 2, "professor": "Ana"}"#);
        let req = AgendaRequest::from_params(&p).unwrap();
        assert_eq!(req.mes, 2);
        assert_eq!(req.ano, 2024);

        // nulo no corpo não apaga o valor da query
        let p = Parametros::from_partes("mes=5", br#"{"month": null}"#);
        assert_eq!(p.inteiro(&["mes", "month"]).unwrap(), Some(5));
    }

    #[test]
    fn corpo_de_formulario() {
        let p = Parametros::from_partes(
            "",
            b"professor=Jo%C3%A3o&disciplina=Hist%C3%B3ria&ano_serie=7%C2%BA+ano&bimestre=2&ciclo=2",
        );
        let req = GuiaRequest::from_params(&p).unwrap();
        assert_eq!(req.professor, "João");
        assert_eq!(req.ano_serie, "7º ano");
        assert_eq!(req.ciclo, 2);
        assert!(req.fontes.is_none());
    }

    #[test]
    fn lista_todos_os_obrigatorios_ausentes() {
        let p = params(json!({"professor": "Ana", "ciclo": "1"}));
        match GuiaRequest::from_params(&p).unwrap_err() {
            GeradorError::MissingParameter(f) => assert_eq!(f, vec!["disciplina", "ano_serie", "bimestre"]),
            outro => panic!("erro inesperado: {:?}", outro),
        }
    }

    #[test]
    fn apelidos_em_ingles() {
        let p = params(json!({"month": "3", "year": 2025, "professor": "Bia", "return_base64": "false"}));
        let req = AgendaRequest::from_params(&p).unwrap();
        assert_eq!((req.mes, req.ano), (3, 2025));
        assert!(!req.return_base64);
    }

    #[test]
    fn valores_invalidos() {
        let p = params(json!({"mes": 13, "ano": 2025, "professor": "x"}));
        assert_eq!(AgendaRequest::from_params(&p).unwrap_err().kind(), "InvalidParameter");

        let p = params(json!({"mes": "março", "ano": 2025, "professor": "x"}));
        assert_eq!(AgendaRequest::from_params(&p).unwrap_err().kind(), "InvalidParameter");

        let p = params(json!({"professor": "a", "disciplina": "b", "ano_serie": "6", "bimestre": "1", "ciclo": 4}));
        assert_eq!(GuiaRequest::from_params(&p).unwrap_err().kind(), "InvalidParameter");
    }

    #[test]
    fn professores_aninhados() {
        let p = params(json!({
            "titulo": "Robótica",
            "tema": "Tecnologia",
            "professores": {"professor1": "Ana", "professor2": "Bia"},
            "justificativa": "j",
            "objetivo": "o"
        }));
        let req = EmentaRequest::from_params(&p).unwrap();
        assert_eq!(req.professor1, "Ana");
        assert_eq!(req.professor2, "Bia");
        assert_eq!(req.habilidades, "");
    }

    #[test]
    fn ementa_sem_professor() {
        let p = params(json!({"titulo": "t", "tema": "t", "justificativa": "j"}));
        match EmentaRequest::from_params(&p).unwrap_err() {
            GeradorError::MissingParameter(f) => assert_eq!(f, vec!["professor1", "objetivo"]),
            outro => panic!("erro inesperado: {:?}", outro),
        }
    }
}
