// src/models/dashboard.rs

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// Abreviações usadas nos rótulos do gráfico de evolução
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun",
    "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

// 1. Período de um mês-calendário fechado [primeiro dia, último dia]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    // Limites do mês-calendário que contém a data de referência
    pub fn month_of(reference: NaiveDate) -> Self {
        Self::from_year_month(reference.year(), reference.month())
    }

    // Mês-calendário `offset` meses antes de `today` (0 = mês atual)
    pub fn months_back(today: NaiveDate, offset: u32) -> Self {
        let months = today.year() * 12 + today.month0() as i32 - offset as i32;
        Self::from_year_month(months.div_euclid(12), months.rem_euclid(12) as u32 + 1)
    }

    fn from_year_month(year: i32, month: u32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .expect("dia 1 de um mês entre 1 e 12 é sempre válido");
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .expect("último dia do mês é sempre válido");
        Self { start, end }
    }

    // Datas no formato YYYY-MM-DD esperado pela API de relatórios.
    // Formatamos a partir dos campos do calendário local, nunca via epoch/UTC,
    // para não escorregar um dia perto da meia-noite.
    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    // Rótulo curto do mês de início (Jan..Dez)
    pub fn label(&self) -> &'static str {
        MONTH_LABELS[self.start.month0() as usize]
    }
}

// 2. Linha do relatório de vendas por empresa, como vem da API de relatórios.
// Os nomes dos campos seguem o contrato do backend (snake_case, sem rename).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SalesReportRow {
    #[serde(default)]
    pub company_name: Option<String>,

    // Valores ausentes, nulos ou não numéricos contam como zero na soma
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub total_sales: Decimal,

    #[serde(default, deserialize_with = "count_or_zero")]
    pub order_count: i64,
}

fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(Decimal::ZERO))
}

fn count_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)))
        .unwrap_or(0))
}

// 3. Ponto do gráfico de evolução (12 meses, do mais antigo ao atual)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesEvolutionEntry {
    pub month: String,
    pub total: Decimal,
}

// 4. KPI do mês atual com a variação percentual sobre o mês anterior.
// `trend = None` significa "sem base de comparação" (mês anterior zerado e
// mês atual com movimento), que o frontend exibe como "novo" em vez de
// +0% ou -100%.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiEntry {
    pub value: Decimal,
    pub trend: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub revenue: KpiEntry,
    pub orders: KpiEntry,
    pub average_ticket: KpiEntry,
}

// 5. Filtro de período do relatório (datas ausentes = mês atual)
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_period_bounds"))]
pub struct ReportPeriodQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportPeriodQuery {
    pub fn resolve(&self, today: NaiveDate) -> Period {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Period { start, end },
            _ => Period::month_of(today),
        }
    }
}

fn validate_period_bounds(query: &ReportPeriodQuery) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            let mut error = ValidationError::new("periodo_invalido");
            error.message = Some("A data inicial não pode ser posterior à data final.".into());
            return Err(error);
        }
    }
    Ok(())
}
