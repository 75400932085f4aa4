// src/common/cache.rs

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::models::dashboard::{Period, SalesReportRow};

// Chave explícita por (endpoint, parâmetros), em vez de uma string fixa
// global: a mesma consulta com datas diferentes ocupa entradas diferentes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    endpoint: &'static str,
    start_date: String,
    end_date: String,
}

impl CacheKey {
    pub fn new(endpoint: &'static str, period: &Period) -> Self {
        Self {
            endpoint,
            start_date: period.start_str(),
            end_date: period.end_str(),
        }
    }
}

struct CacheEntry {
    stored_at: Instant,
    rows: Vec<SalesReportRow>,
}

// Cache em memória das respostas da API de relatórios, com validade curta
// (TTL vem da configuração). Só resultados bem-sucedidos entram aqui;
// falhas são sempre reconsultadas.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Vec<SalesReportRow>> {
        let entries = self.entries.lock().expect("lock do cache não envenenado");
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.rows.clone())
    }

    pub fn put(&self, key: CacheKey, rows: Vec<SalesReportRow>) {
        let mut entries = self.entries.lock().expect("lock do cache não envenenado");
        // Aproveita a escrita para descartar entradas já vencidas
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                rows,
            },
        );
    }
}
