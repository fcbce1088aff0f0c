// ==========================================
// 药房库存决策支持系统 - 压库信号
// ==========================================
// 职责: 回答"哪些药品占压资金", 产出降量建议
// 口径: 库存超过最低线的 N 倍(默认 3), 且按当前消耗速度去化超过 M 天(默认 90)
// ==========================================

use crate::config::AnalyzerPolicy;
use crate::domain::{RecommendationCandidate, RecommendationType, Severity};
use crate::repository::RepositoryResult;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};

/// 月度持有成本率（资金占用的 1.5%/月）
const MONTHLY_HOLDING_COST_RATE: f64 = 0.015;

/// 压库行
#[derive(Debug, Clone, PartialEq)]
pub struct OverstockRow {
    pub drug_name: String,
    pub category: String,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub excess_stock: i64,
    pub tied_capital: f64,
    pub avg_daily_consumption: f64,
}

/// 分析: 压库条目
///
/// 两个阈值均来自 AnalyzerPolicy（默认 3 倍 / 90 天）。
/// 按占压资金降序, 最多 15 行。
pub fn analyze(
    conn: &Connection,
    today: NaiveDate,
    policy: &AnalyzerPolicy,
) -> RepositoryResult<Vec<OverstockRow>> {
    let window_start = today - Duration::days(30);

    let mut stmt = conn.prepare(
        r#"
        SELECT i.drug_name, i.category, i.current_stock, i.minimum_stock,
               (i.current_stock - i.minimum_stock) AS excess_stock,
               (i.current_stock * i.unit_price) AS tied_capital,
               COALESCE(AVG(cp.quantity_consumed), 0) AS avg_daily_consumption
        FROM inventory i
        LEFT JOIN consumption_patterns cp ON i.id = cp.drug_id
          AND cp.date >= ?1
        WHERE i.current_stock > i.minimum_stock * ?2
        GROUP BY i.id, i.drug_name, i.category, i.current_stock, i.minimum_stock, i.unit_price
        HAVING avg_daily_consumption < (i.current_stock / ?3)
        ORDER BY tied_capital DESC
        LIMIT 15
    "#,
    )?;

    let rows = stmt
        .query_map(
            params![
                window_start,
                policy.overstock_stock_multiple,
                policy.overstock_depletion_days
            ],
            |row| {
                Ok(OverstockRow {
                    drug_name: row.get(0)?,
                    category: row.get(1)?,
                    current_stock: row.get(2)?,
                    minimum_stock: row.get(3)?,
                    excess_stock: row.get(4)?,
                    tied_capital: row.get(5)?,
                    avg_daily_consumption: row.get(6)?,
                })
            },
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// 生成: 库存降量建议
///
/// 固定 Medium 影响 / Low 紧急 / 基础分 60;
/// 月度持有成本 = 占压资金 × 0.015, 收益按 6 个月持有成本估算。
pub fn generate(rows: &[OverstockRow]) -> Vec<RecommendationCandidate> {
    rows.iter()
        .map(|row| {
            let monthly_holding_cost = row.tied_capital * MONTHLY_HOLDING_COST_RATE;

            RecommendationCandidate {
                rec_type: RecommendationType::ReduceStock,
                category: "Cost Optimization".to_string(),
                title: format!("💰 Optimize stock levels for {}", row.drug_name),
                description: format!(
                    "Excess inventory of {} units (¥{:.2} tied up). Daily consumption: {:.1} units. \
                     Holding cost: ¥{:.2}/month.",
                    row.excess_stock, row.tied_capital, row.avg_daily_consumption, monthly_holding_cost
                ),
                action: format!(
                    "Reduce stock by {} units via supplier returns or branch transfers",
                    (row.excess_stock as f64 * 0.6) as i64
                ),
                impact: Severity::Medium,
                urgency: Severity::Low,
                estimated_cost: row.tied_capital * 0.02,
                estimated_savings: monthly_holding_cost * 6.0,
                priority_score: 60.0,
                days_until_impact: 90,
                roi_ratio: 0.0,
            }
        })
        .collect()
}
