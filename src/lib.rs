// src/lib.rs

use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod clients;
pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

// Monta o router da aplicação. Separado do main para os testes de
// integração conseguirem montar o app com um estado próprio.
pub fn app(state: AppState) -> Router {
    let dashboard_routes = Router::new()
        .route("/kpis", get(handlers::dashboard::get_kpis))
        .route("/evolucao-mensal", get(handlers::dashboard::get_sales_evolution))
        .route(
            "/relatorio/vendas-empresa",
            get(handlers::dashboard::get_sales_by_company),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}
