use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// GET /health e /healthcheck
pub async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "gerar_agenda": true,
            "gerar_guias": true,
            "gerar_ementa_eletiva": true
        }
    }))
}
