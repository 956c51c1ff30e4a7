use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;

use super::respostas::{erro, sucesso};
use crate::api_json::{AgendaRequest, EmentaRequest, GuiaRequest, Parametros};
use crate::config::AppConfig;
use crate::error::Result;
use crate::geradores::{
    criar_agenda, entregar, gerar_ementa, gerar_guia, SUBDIR_AGENDAS, SUBDIR_EMENTAS, SUBDIR_GUIAS,
};
use crate::models::Saida;

/// Roda a geração fora do executor async e converte o resultado em resposta.
async fn executar<F>(rota: &'static str, params: Parametros, gerar: F) -> HttpResponse
where
    F: FnOnce(&Parametros) -> Result<Saida> + Send + 'static,
{
    let start = std::time::Instant::now();
    let blocking_handle = tokio::task::spawn_blocking(move || {
        let resultado = gerar(&params);
        (params, resultado)
    });

    let (params, resultado) = match blocking_handle.await {
        Ok(r) => r,
        Err(e) => {
            log::error!("{}: task join error: {}", rota, e);
            return HttpResponse::InternalServerError()
                .json(json!({"status": "error", "kind": "Internal", "message": format!("task join error: {}", e)}));
        }
    };

    match resultado {
        Ok(saida) => {
            log::info!("{}: {} em {} ms", rota, saida.file_name(), start.elapsed().as_millis());
            sucesso(&saida)
        }
        Err(e) => {
            log::error!("{}: {} | recebido: {}", rota, e, params.recebidos());
            erro(&e, params.recebidos())
        }
    }
}

/// POST /generate/agenda (e /webhook/n8n/gerar-agenda)
pub async fn agenda_handler(req: HttpRequest, body: web::Bytes, cfg: web::Data<AppConfig>) -> impl Responder {
    let params = Parametros::from_partes(req.query_string(), &body);
    let cfg: Arc<AppConfig> = cfg.into_inner();
    executar("gerar-agenda", params, move |p| {
        let pedido = AgendaRequest::from_params(p)?;
        let doc = criar_agenda(pedido.mes, pedido.ano, &pedido.professor)?;
        entregar(doc, pedido.return_base64, &cfg.output_dir, SUBDIR_AGENDAS)
    })
    .await
}

/// POST /generate/guide (e /webhook/n8n/guias)
pub async fn guia_handler(req: HttpRequest, body: web::Bytes, cfg: web::Data<AppConfig>) -> impl Responder {
    let params = Parametros::from_partes(req.query_string(), &body);
    let cfg: Arc<AppConfig> = cfg.into_inner();
    executar("gerar-guia", params, move |p| {
        let pedido = GuiaRequest::from_params(p)?;
        let doc = gerar_guia(&cfg, &pedido)?;
        entregar(doc, pedido.return_base64, &cfg.output_dir, SUBDIR_GUIAS)
    })
    .await
}

/// POST /generate/elective-syllabus (e /webhook/n8n/gerar-ementa-eletiva)
pub async fn ementa_handler(req: HttpRequest, body: web::Bytes, cfg: web::Data<AppConfig>) -> impl Responder {
    let params = Parametros::from_partes(req.query_string(), &body);
    let cfg: Arc<AppConfig> = cfg.into_inner();
    executar("gerar-ementa", params, move |p| {
        let pedido = EmentaRequest::from_params(p)?;
        let doc = gerar_ementa(&cfg, &pedido)?;
        entregar(doc, pedido.return_base64, &cfg.output_dir, SUBDIR_EMENTAS)
    })
    .await
}
