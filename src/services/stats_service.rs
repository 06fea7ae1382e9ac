use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregation::{
    filter_last_days, grouped_cats, last_n_days, CategoryAmount, DailySeries, WindowPreset,
};
use crate::calendar::{ClampedMonth, MonthBoundaries};
use crate::comparison::{monthly_comparison, MonthlyComparison};
use crate::config::Config;
use crate::errors::Result;
use crate::ledger::{CategoryCatalog, Flow, Transaction, TransactionLog};
use crate::time::{Clock, SystemClock};

/// What the stats screen currently has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSelection {
    pub expense_window: WindowPreset,
    pub income_window: WindowPreset,
    pub distribution_window: WindowPreset,
    pub month: ClampedMonth,
}

impl StatsSelection {
    pub fn from_config(config: &Config, now: DateTime<Utc>) -> Self {
        Self {
            expense_window: config.expense_window,
            income_window: config.income_window,
            distribution_window: config.distribution_window,
            month: ClampedMonth::containing(now),
        }
    }

    pub fn with_month(self, month: ClampedMonth) -> Self {
        Self { month, ..self }
    }

    pub fn previous_month(self) -> Self {
        self.with_month(self.month.prior())
    }

    pub fn next_month(self) -> Self {
        self.with_month(self.month.next())
    }
}

/// Everything the stats screen renders, computed against one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub generated_at: DateTime<Utc>,
    pub daily_expenses: DailySeries,
    pub daily_income: DailySeries,
    pub distribution: Vec<CategoryAmount>,
    pub month_label: String,
    /// False while the selected month is the current one.
    pub can_go_next: bool,
    pub monthly: MonthlyComparison,
}

/// Runs the stats calculations against an injected catalog and clock.
pub struct StatsService {
    catalog: CategoryCatalog,
    clock: Arc<dyn Clock>,
}

impl StatsService {
    pub fn new(catalog: CategoryCatalog, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }

    pub fn with_system_clock(catalog: CategoryCatalog) -> Self {
        Self::new(catalog, Arc::new(SystemClock))
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn current_month(&self) -> ClampedMonth {
        ClampedMonth::containing(self.now())
    }

    pub fn is_current(&self, month: ClampedMonth) -> bool {
        month.is_current(self.now())
    }

    pub fn boundaries(&self, month: ClampedMonth) -> MonthBoundaries {
        month.boundaries(self.now())
    }

    pub fn last_n_days(
        &self,
        transactions: &[Transaction],
        days: u32,
        flow: Flow,
    ) -> Result<DailySeries> {
        last_n_days(transactions, &self.catalog, days, flow, self.now())
    }

    pub fn filter_last_days<'a>(
        &self,
        transactions: &'a [Transaction],
        days: u32,
        flow: Flow,
    ) -> Vec<&'a Transaction> {
        filter_last_days(transactions, days, flow, self.now())
    }

    pub fn monthly_comparison(
        &self,
        transactions: &[Transaction],
        month: ClampedMonth,
    ) -> Result<MonthlyComparison> {
        monthly_comparison(transactions, month, self.now())
    }

    /// Builds the full report. Reads the clock once so every part agrees on "now".
    pub fn report(
        &self,
        log: &TransactionLog,
        selection: &StatsSelection,
        locale: &str,
    ) -> Result<StatsReport> {
        log.validate_categories(&self.catalog)?;
        let now = self.now();
        let transactions = log.transactions();

        let daily_expenses = last_n_days(
            transactions,
            &self.catalog,
            selection.expense_window.days(),
            Flow::Expense,
            now,
        )?;
        let daily_income = last_n_days(
            transactions,
            &self.catalog,
            selection.income_window.days(),
            Flow::Income,
            now,
        )?;
        let distribution = grouped_cats(filter_last_days(
            transactions,
            selection.distribution_window.days(),
            Flow::Expense,
            now,
        ))?;
        let monthly = monthly_comparison(transactions, selection.month, now)?;

        tracing::info!(
            transactions = log.len(),
            month = %selection.month,
            "stats report generated"
        );
        Ok(StatsReport {
            generated_at: now,
            daily_expenses,
            daily_income,
            distribution,
            month_label: selection.month.localize(locale),
            can_go_next: !selection.month.is_current(now),
            monthly,
        })
    }
}
