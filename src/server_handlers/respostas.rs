use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::{json, Value};

use crate::error::GeradorError;
use crate::models::Saida;

pub fn status_do_erro(e: &GeradorError) -> StatusCode {
    match e {
        GeradorError::MissingParameter(_)
        | GeradorError::InvalidParameter { .. }
        | GeradorError::InvalidFilterValue { .. } => StatusCode::BAD_REQUEST,
        GeradorError::SheetNotFound { .. }
        | GeradorError::ColumnNotFound { .. }
        | GeradorError::NoMatchingRows { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn sucesso(saida: &Saida) -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "success", "data": saida}))
}

/// Corpo de erro com tipo, mensagem, diagnóstico e eco dos parâmetros.
pub fn erro(e: &GeradorError, recebidos: Value) -> HttpResponse {
    HttpResponse::build(status_do_erro(e)).json(json!({
        "status": "error",
        "kind": e.kind(),
        "message": e.to_string(),
        "details": e.details(),
        "received": recebidos,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapeia_status() {
        assert_eq!(status_do_erro(&GeradorError::MissingParameter(vec!["mes".into()])), StatusCode::BAD_REQUEST);
        let aba = GeradorError::SheetNotFound { aba: "x".into(), disponiveis: vec![], sugestao: None };
        assert_eq!(status_do_erro(&aba), StatusCode::UNPROCESSABLE_ENTITY);
        let tpl = GeradorError::TemplateNotFound("t.docx".into());
        assert_eq!(status_do_erro(&tpl), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
