// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    clients::report_client::SalesReportSource,
    common::error::AppError,
    models::dashboard::{DashboardKpis, KpiEntry, Period, SalesEvolutionEntry, SalesReportRow},
};

// Quantidade de meses do gráfico de evolução
const EVOLUTION_MONTHS: u32 = 12;

#[derive(Clone)]
pub struct DashboardService {
    reports: Arc<dyn SalesReportSource>,
}

impl DashboardService {
    pub fn new(reports: Arc<dyn SalesReportSource>) -> Self {
        Self { reports }
    }

    // Série de evolução: mês atual + 11 anteriores, do mais antigo ao atual.
    // Cada mês é consultado de forma independente; a falha de um mês vira
    // total zero e não derruba os outros onze.
    pub async fn sales_evolution(&self, today: NaiveDate) -> Vec<SalesEvolutionEntry> {
        let mut series = Vec::with_capacity(EVOLUTION_MONTHS as usize);

        for offset in (0..EVOLUTION_MONTHS).rev() {
            let period = Period::months_back(today, offset);
            let rows = self.rows_or_empty(&period).await;
            let (total, _) = sum_rows(&rows);

            series.push(SalesEvolutionEntry {
                month: period.label().to_string(),
                total,
            });
        }

        series
    }

    // KPIs do mês atual com variação sobre o mês anterior. As duas consultas
    // não dependem uma da outra e rodam em paralelo.
    pub async fn monthly_kpis(&self, today: NaiveDate) -> DashboardKpis {
        let current = Period::months_back(today, 0);
        let previous = Period::months_back(today, 1);

        let (current_rows, previous_rows) =
            tokio::join!(self.rows_or_empty(&current), self.rows_or_empty(&previous));

        let (revenue, orders) = sum_rows(&current_rows);
        let (prev_revenue, prev_orders) = sum_rows(&previous_rows);

        // O ticket médio compara os valores derivados de cada mês, não herda
        // a variação do faturamento.
        let ticket = average_ticket(revenue, orders);
        let prev_ticket = average_ticket(prev_revenue, prev_orders);

        DashboardKpis {
            revenue: KpiEntry {
                value: revenue,
                trend: percent_change(revenue, prev_revenue),
            },
            orders: KpiEntry {
                value: Decimal::from(orders),
                trend: percent_change(Decimal::from(orders), Decimal::from(prev_orders)),
            },
            average_ticket: KpiEntry {
                value: ticket,
                trend: percent_change(ticket, prev_ticket),
            },
        }
    }

    // Relatório por empresa para um período arbitrário (tela de Relatórios).
    // Aqui a falha do colaborador é propagada: o usuário pediu esse dado
    // explicitamente e recebe um erro em vez de uma tabela zerada.
    pub async fn sales_by_company(
        &self,
        period: &Period,
    ) -> Result<Vec<SalesReportRow>, AppError> {
        self.reports.sales_by_company(period).await
    }

    async fn rows_or_empty(&self, period: &Period) -> Vec<SalesReportRow> {
        match self.reports.sales_by_company(period).await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(
                    "Relatório de {} a {} indisponível, assumindo zero: {}",
                    period.start_str(),
                    period.end_str(),
                    err
                );
                Vec::new()
            }
        }
    }
}

// Soma (faturamento, pedidos) de todas as linhas do período
fn sum_rows(rows: &[SalesReportRow]) -> (Decimal, i64) {
    rows.iter().fold((Decimal::ZERO, 0), |(total, count), row| {
        (total + row.total_sales, count + row.order_count)
    })
}

// Ticket médio do período (zero quando não houve pedidos)
fn average_ticket(revenue: Decimal, orders: i64) -> Decimal {
    if orders == 0 {
        Decimal::ZERO
    } else {
        revenue / Decimal::from(orders)
    }
}

// Variação percentual entre dois períodos. Base zero com atual zero é
// variação zero; base zero com movimento novo não tem comparação válida
// e vira `None` (o frontend mostra "novo", não +0% nem -100%).
fn percent_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous == Decimal::ZERO {
        if current == Decimal::ZERO {
            Some(Decimal::ZERO)
        } else {
            None
        }
    } else {
        Some((current - previous) / previous.abs() * Decimal::ONE_HUNDRED)
    }
}
