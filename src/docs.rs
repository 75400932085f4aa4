// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_kpis,
        handlers::dashboard::get_sales_evolution,
        handlers::dashboard::get_sales_by_company,
    ),
    components(
        schemas(
            models::dashboard::DashboardKpis,
            models::dashboard::KpiEntry,
            models::dashboard::SalesEvolutionEntry,
            models::dashboard::SalesReportRow,
        )
    ),
    tags(
        (name = "Dashboard", description = "Agregados de vendas para o painel do gestor")
    ),
    info(
        title = "Dashboard Agregador",
        description = "BFF que consolida os relatórios de vendas para o painel do gestor",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
