mod common;

use actix_web::{http::StatusCode, test, web, App};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};

use geradocs::server::configure;

macro_rules! app {
    ($cfg:expr) => {
        test::init_service(App::new().app_data(web::Data::new($cfg)).configure(configure)).await
    };
}

#[actix_web::test]
async fn test_health_e_alias() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(geradocs::config::AppConfig::with_base_dir(dir.path()));

    for rota in ["/health", "/healthcheck"] {
        let req = test::TestRequest::get().uri(rota).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["gerar_guias"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}

#[actix_web::test]
async fn test_agenda_base64() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(geradocs::config::AppConfig::with_base_dir(dir.path()));

    let req = test::TestRequest::post()
        .uri("/generate/agenda?ano=2025&mes=1")
        .set_json(json!({"month": "2", "professor": "Maria"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["file_name"], "Agenda_Maria_02_2025.xlsx");
    let bytes = general_purpose::STANDARD
        .decode(body["data"]["file_base64"].as_str().unwrap())
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[actix_web::test]
async fn test_parametros_faltando() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(geradocs::config::AppConfig::with_base_dir(dir.path()));

    let req = test::TestRequest::post()
        .uri("/webhook/n8n/gerar-agenda")
        .set_json(json!({"professor": "Maria"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["kind"], "MissingParameter");
    assert_eq!(body["details"]["missing"], json!(["mes", "ano"]));
    assert_eq!(body["received"]["professor"], "Maria");
}

#[actix_web::test]
async fn test_guia_aba_inexistente_422() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(common::montar_base(dir.path()));

    let req = test::TestRequest::post()
        .uri("/generate/guide")
        .set_json(json!({
            "professor": "Maria",
            "subject": "Ciências",
            "grade": "6º ano",
            "term": 1,
            "cycle": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "SheetNotFound");
    assert_eq!(body["details"]["abas_disponiveis"], json!(["Matemática", "Língua Portuguesa", "Arte"]));
    assert!(body["message"].as_str().unwrap().contains("Ciências"));
    assert_eq!(body["received"]["cycle"], 2);
}

#[actix_web::test]
async fn test_guia_por_formulario_gravando_arquivo() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = common::montar_base(dir.path());
    let output = cfg.output_dir.clone();
    let app = app!(cfg);

    let req = test::TestRequest::post()
        .uri("/webhook/n8n/guias?return_base64=false")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("professor=Maria&disciplina=Matem%C3%A1tica&ano_serie=6%C2%BA+ano&bimestre=1&ciclo=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "success", "{}", body);
    let path = body["data"]["file_path"].as_str().unwrap();
    assert!(path.starts_with(output.join("guias").to_str().unwrap()));
    assert!(std::path::Path::new(path).is_file());
    assert!(body["data"].get("file_base64").is_none());
}

#[actix_web::test]
async fn test_ementa_professores_aninhados() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(common::montar_base(dir.path()));

    let req = test::TestRequest::post()
        .uri("/generate/elective-syllabus")
        .set_json(json!({
            "title": "Clube de Leitura",
            "theme": "Literatura",
            "professores": {"professor1": "Ana", "professor2": "Bia"},
            "justification": "Formar leitores",
            "objective": "Ler um livro por mês"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "success", "{}", body);
    assert_eq!(body["data"]["file_name"], "EMENTA_CLUBE_DE_LEITURA.docx");
    assert_eq!(
        body["data"]["mime_type"],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );

    let bytes = general_purpose::STANDARD
        .decode(body["data"]["file_base64"].as_str().unwrap())
        .unwrap();
    let xml = common::ler_parte(&bytes, "word/document.xml");
    assert!(xml.contains("Ana / Bia"));
}
