use serde::{Deserialize, Serialize};

use crate::domain::{BudgetReport, Category, Cents, MonthTrend};

/// Per-category spending breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: Cents,
    pub count: i64,
    pub percentage: f64,
}

/// Per-month totals with month-over-month classification, ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub months: Vec<MonthTrend>,
}

/// Current-month spending vs the fixed budget limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetStatus {
    #[serde(flatten)]
    pub report: BudgetReport,
    pub exceeded: bool,
}

impl From<BudgetReport> for BudgetStatus {
    fn from(report: BudgetReport) -> Self {
        let exceeded = report.exceeded();
        Self { report, exceeded }
    }
}
