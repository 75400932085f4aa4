// tests/dashboard_api.rs
//
// Testes de integração contra uma API de relatórios simulada (wiremock).

use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dashboard_agregador::app;
use dashboard_agregador::clients::ReportClient;
use dashboard_agregador::config::AppState;
use dashboard_agregador::models::dashboard::Period;
use dashboard_agregador::services::DashboardService;

const TTL: Duration = Duration::from_secs(300);
const TIMEOUT: Duration = Duration::from_secs(5);

fn rows_json(total: f64, orders: i64) -> Value {
    json!([{ "company_name": "Acme Ltda", "total_sales": total, "order_count": orders }])
}

fn service(base_url: &str, ttl: Duration) -> DashboardService {
    let client = ReportClient::new(base_url, TIMEOUT, ttl).expect("cliente de teste");
    DashboardService::new(Arc::new(client))
}

fn state(base_url: &str) -> AppState {
    AppState {
        dashboard_service: service(base_url, TTL),
        bind_addr: "0.0.0.0:0".to_string(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[tokio::test]
async fn evolucao_mensal_tolera_a_queda_de_um_mes() {
    let server = MockServer::start().await;

    // Outubro/2023 responde 500; os mocks são avaliados na ordem de montagem,
    // então o genérico abaixo cobre os outros onze meses.
    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .and(query_param("start_date", "2023-10-01"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows_json(100.0, 1)))
        .mount(&server)
        .await;

    let service = service(&server.uri(), TTL);
    let series = service.sales_evolution(date(2024, 3, 15)).await;

    assert_eq!(series.len(), 12);
    assert_eq!(series[6].month, "Out");
    assert_eq!(series[6].total, Decimal::ZERO);
    for (idx, point) in series.iter().enumerate() {
        if idx != 6 {
            assert_eq!(point.total, Decimal::from(100), "mês {}", point.month);
        }
    }
}

#[tokio::test]
async fn evolucao_mensal_reaproveita_o_cache_dentro_do_ttl() {
    let server = MockServer::start().await;

    // Doze consultas na primeira passada; a segunda vem inteira do cache.
    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows_json(250.0, 2)))
        .expect(12)
        .mount(&server)
        .await;

    let service = service(&server.uri(), TTL);
    let first = service.sales_evolution(date(2024, 3, 15)).await;
    let second = service.sales_evolution(date(2024, 3, 15)).await;

    assert_eq!(first.len(), 12);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.month, b.month);
        assert_eq!(a.total, b.total);
    }
}

#[tokio::test]
async fn ttl_zero_reconsulta_o_backend_a_cada_chamada() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows_json(80.0, 1)))
        .expect(2)
        .mount(&server)
        .await;

    let service = service(&server.uri(), Duration::ZERO);
    let period = Period::month_of(date(2024, 3, 15));

    service.sales_by_company(&period).await.unwrap();
    service.sales_by_company(&period).await.unwrap();
}

#[tokio::test]
async fn kpis_comparam_mes_atual_com_o_anterior() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .and(query_param("start_date", "2024-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows_json(1000.0, 10)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .and(query_param("start_date", "2024-02-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows_json(400.0, 8)))
        .mount(&server)
        .await;

    let service = service(&server.uri(), TTL);
    let kpis = service.monthly_kpis(date(2024, 3, 15)).await;

    assert_eq!(kpis.revenue.trend, Some(Decimal::from(150)));
    assert_eq!(kpis.orders.trend, Some(Decimal::from(25)));
    // Ticket: 100 contra 50, variação própria de 100% (não os 150% do faturamento)
    assert_eq!(kpis.average_ticket.trend, Some(Decimal::from(100)));
}

#[tokio::test]
async fn linhas_malformadas_somam_zero_sem_derrubar_a_consulta() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "company_name": "Sem total", "order_count": 3 },
            { "company_name": "Nula", "total_sales": null, "order_count": null },
            { "company_name": "Válida", "total_sales": 500.0, "order_count": 5 }
        ])))
        .mount(&server)
        .await;

    let service = service(&server.uri(), TTL);
    let kpis = service.monthly_kpis(date(2024, 3, 15)).await;

    assert_eq!(kpis.revenue.value, Decimal::from(500));
    assert_eq!(kpis.orders.value, Decimal::from(8));
}

#[tokio::test]
async fn rota_de_kpis_responde_o_payload_do_painel() {
    let server = MockServer::start().await;

    // Mesmas linhas nos dois meses: toda variação deve ser exatamente zero
    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows_json(1000.0, 10)))
        .mount(&server)
        .await;

    let response = app(state(&server.uri()))
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/kpis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["revenue"]["value"], json!(1000.0));
    assert_eq!(body["revenue"]["trend"], json!(0.0));
    assert_eq!(body["orders"]["value"], json!(10.0));
    assert_eq!(body["averageTicket"]["value"], json!(100.0));
    assert_eq!(body["averageTicket"]["trend"], json!(0.0));
}

#[tokio::test]
async fn rota_de_relatorio_valida_o_periodo() {
    let server = MockServer::start().await;

    let response = app(state(&server.uri()))
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/relatorio/vendas-empresa?start_date=2024-06-30&end_date=2024-06-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rota_de_relatorio_propaga_queda_do_backend_como_502() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/sales-by-entity"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = app(state(&server.uri()))
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/relatorio/vendas-empresa?start_date=2024-06-01&end_date=2024-06-30")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn health_check_responde_ok() {
    let server = MockServer::start().await;

    let response = app(state(&server.uri()))
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
