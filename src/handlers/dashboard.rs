// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::dashboard::{
        DashboardKpis, ReportPeriodQuery, SalesEvolutionEntry, SalesReportRow,
    },
};

// GET /api/dashboard/kpis
#[utoipa::path(
    get,
    path = "/api/dashboard/kpis",
    tag = "Dashboard",
    responses(
        (status = 200, description = "KPIs do mês atual com variação sobre o mês anterior", body = DashboardKpis),
        (status = 502, description = "API de relatórios indisponível")
    )
)]
pub async fn get_kpis(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    // A data de referência entra aqui, na borda HTTP; o serviço em si não
    // olha para o relógio, o que mantém o cálculo determinístico nos testes.
    let today = Local::now().date_naive();

    let kpis = app_state.dashboard_service.monthly_kpis(today).await;

    Ok((StatusCode::OK, Json(kpis)))
}

// GET /api/dashboard/evolucao-mensal
#[utoipa::path(
    get,
    path = "/api/dashboard/evolucao-mensal",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Evolução de vendas dos últimos 12 meses (do mais antigo ao atual)", body = Vec<SalesEvolutionEntry>)
    )
)]
pub async fn get_sales_evolution(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();

    let series = app_state.dashboard_service.sales_evolution(today).await;

    Ok((StatusCode::OK, Json(series)))
}

// GET /api/dashboard/relatorio/vendas-empresa
#[utoipa::path(
    get,
    path = "/api/dashboard/relatorio/vendas-empresa",
    tag = "Dashboard",
    params(
        ("start_date" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD); ausente = mês atual"),
        ("end_date" = Option<String>, Query, description = "Data final (YYYY-MM-DD); ausente = mês atual")
    ),
    responses(
        (status = 200, description = "Vendas por empresa no período", body = Vec<SalesReportRow>),
        (status = 400, description = "Período inválido"),
        (status = 502, description = "API de relatórios indisponível")
    )
)]
pub async fn get_sales_by_company(
    State(app_state): State<AppState>,
    Query(params): Query<ReportPeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let period = params.resolve(Local::now().date_naive());
    let rows = app_state.dashboard_service.sales_by_company(&period).await?;

    Ok((StatusCode::OK, Json(rows)))
}
