// src/clients/report_client.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    common::{
        cache::{CacheKey, ResponseCache},
        error::AppError,
    },
    models::dashboard::{Period, SalesReportRow},
};

// Endpoint do relatório de vendas por empresa no backend de relatórios
const SALES_BY_ENTITY_PATH: &str = "/reports/sales-by-entity";

// Interface da fonte de relatórios. O serviço de dashboard só conhece este
// trait; nos testes ele é substituído por um stub sem rede.
#[async_trait]
pub trait SalesReportSource: Send + Sync {
    // Linhas de venda por empresa dentro do período (lista vazia = sem
    // movimento no período, nunca um erro).
    async fn sales_by_company(&self, period: &Period) -> Result<Vec<SalesReportRow>, AppError>;
}

// Cliente HTTP da API de relatórios
#[derive(Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<ResponseCache>,
}

impl ReportClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        cache_ttl: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: Arc::new(ResponseCache::new(cache_ttl)),
        })
    }
}

#[async_trait]
impl SalesReportSource for ReportClient {
    async fn sales_by_company(&self, period: &Period) -> Result<Vec<SalesReportRow>, AppError> {
        let key = CacheKey::new(SALES_BY_ENTITY_PATH, period);
        if let Some(rows) = self.cache.get(&key) {
            tracing::debug!(
                "Cache hit no relatório de vendas ({} a {})",
                period.start_str(),
                period.end_str()
            );
            return Ok(rows);
        }

        let url = format!("{}{}", self.base_url, SALES_BY_ENTITY_PATH);
        let rows: Vec<SalesReportRow> = self
            .http
            .get(&url)
            .query(&[
                ("start_date", period.start_str()),
                ("end_date", period.end_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Só respostas bem-sucedidas entram no cache
        self.cache.put(key, rows.clone());
        Ok(rows)
    }
}
