// ==========================================
// 药房库存决策支持系统 - 滞销信号
// ==========================================
// 职责: 回答"哪些药品周转过低", 产出品类复核建议
// 口径: 有库存且窗口期(默认 90 天)总消耗低于下限(默认 10 单位),
//       无消耗历史按滞销处理
// ==========================================

use crate::config::AnalyzerPolicy;
use crate::domain::{RecommendationCandidate, RecommendationType, Severity};
use crate::repository::RepositoryResult;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};

/// 滞销行
#[derive(Debug, Clone, PartialEq)]
pub struct SlowMoverRow {
    pub drug_name: String,
    pub category: String,
    pub current_stock: i64,
    pub total_consumed: f64,
    pub inventory_value: f64,
}

/// 分析: 滞销条目
///
/// LEFT JOIN + COALESCE 保证无历史的条目以总消耗 0 入选。
/// 按库存价值降序, 最多 15 行。
pub fn analyze(
    conn: &Connection,
    today: NaiveDate,
    policy: &AnalyzerPolicy,
) -> RepositoryResult<Vec<SlowMoverRow>> {
    let window_start = today - Duration::days(policy.slow_mover_window_days);

    let mut stmt = conn.prepare(
        r#"
        SELECT i.drug_name, i.category, i.current_stock,
               COALESCE(SUM(cp.quantity_consumed), 0) AS total_consumed,
               (i.current_stock * i.unit_price) AS inventory_value
        FROM inventory i
        LEFT JOIN consumption_patterns cp ON i.id = cp.drug_id
          AND cp.date >= ?1
        WHERE i.current_stock > 0
        GROUP BY i.id, i.drug_name, i.category, i.current_stock, i.unit_price
        HAVING total_consumed < ?2
        ORDER BY inventory_value DESC
        LIMIT 15
    "#,
    )?;

    let rows = stmt
        .query_map(
            params![window_start, policy.slow_mover_threshold_units],
            |row| {
                Ok(SlowMoverRow {
                    drug_name: row.get(0)?,
                    category: row.get(1)?,
                    current_stock: row.get(2)?,
                    total_consumed: row.get(3)?,
                    inventory_value: row.get(4)?,
                })
            },
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// 生成: 滞销复核建议
///
/// 固定 Medium 影响 / Low 紧急 / 基础分 45。
pub fn generate(rows: &[SlowMoverRow], window_days: i64) -> Vec<RecommendationCandidate> {
    rows.iter()
        .map(|row| RecommendationCandidate {
            rec_type: RecommendationType::SlowMover,
            category: "Inventory Optimization".to_string(),
            title: format!("📉 Review slow-moving item: {}", row.drug_name),
            description: format!(
                "Low turnover: Only {:.0} units in {} days. Stock value: ¥{:.2}. \
                 Consider product review.",
                row.total_consumed, window_days, row.inventory_value
            ),
            action: "Reduce minimum stock levels or consider discontinuation. \
                     Implement clearance promotion."
                .to_string(),
            impact: Severity::Medium,
            urgency: Severity::Low,
            estimated_cost: row.inventory_value * 0.1,
            estimated_savings: row.inventory_value * 0.15,
            priority_score: 45.0,
            days_until_impact: 120,
            roi_ratio: 0.0,
        })
        .collect()
}
