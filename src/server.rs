use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use crate::config::AppConfig;
use crate::server_handlers::{agenda_handler, ementa_handler, guia_handler, health_handler};

/// Registra as rotas. Separado de `run_server` para os testes montarem o
/// mesmo `App` com `actix_web::test`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate/agenda", web::post().to(agenda_handler))
        .route("/generate/guide", web::post().to(guia_handler))
        .route("/generate/elective-syllabus", web::post().to(ementa_handler))
        .route("/health", web::get().to(health_handler))
        // rotas antigas do webhook n8n
        .route("/webhook/n8n/gerar-agenda", web::post().to(agenda_handler))
        .route("/webhook/n8n/guias", web::post().to(guia_handler))
        .route("/webhook/n8n/gerar-ementa-eletiva", web::post().to(ementa_handler))
        .route("/healthcheck", web::get().to(health_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let workers = config.workers;
    log::info!(
        "base: {:?} | saída: {:?} | workers: {}",
        config.base_dir,
        config.output_dir,
        workers
    );
    let data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .workers(workers)
    .bind(bind_addr)?
    .run()
    .await
}
