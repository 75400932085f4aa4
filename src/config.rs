// src/config.rs

use std::{env, sync::Arc, time::Duration};

use crate::{clients::report_client::ReportClient, services::dashboard_service::DashboardService};

const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_PORT: u16 = 3000;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub bind_addr: String,
}

impl AppState {
    // Carrega a configuração do ambiente e monta o gráfico de dependências
    // (cliente de relatórios -> serviço de dashboard).
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let report_api_url =
            env::var("REPORT_API_URL").expect("REPORT_API_URL deve ser definida");

        // O TTL do cache vem da configuração, não de uma constante enterrada
        // no código; zero desliga o cache na prática.
        let cache_ttl = Duration::from_secs(env_u64(
            "CACHE_TTL_SECONDS",
            DEFAULT_CACHE_TTL_SECONDS,
        )?);
        let http_timeout = Duration::from_secs(env_u64(
            "HTTP_TIMEOUT_SECONDS",
            DEFAULT_HTTP_TIMEOUT_SECONDS,
        )?);

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT deve ser um número de porta válido"))?,
            Err(_) => DEFAULT_PORT,
        };

        let report_client = ReportClient::new(report_api_url, http_timeout, cache_ttl)
            .map_err(|e| anyhow::anyhow!("Falha ao criar o cliente de relatórios: {e}"))?;

        tracing::info!("✅ Cliente da API de relatórios configurado com sucesso!");

        let dashboard_service = DashboardService::new(Arc::new(report_client));

        Ok(Self {
            dashboard_service,
            bind_addr: format!("0.0.0.0:{port}"),
        })
    }
}

fn env_u64(name: &str, default: u64) -> anyhow::Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("{name} deve ser um número inteiro de segundos")),
        Err(_) => Ok(default),
    }
}
