// ==========================================
// 药房库存决策支持系统 - 低库存信号
// ==========================================
// 职责: 回答"哪些药品缺货在即", 产出紧急补货建议
// 口径: current_stock < minimum_stock, 30 天平均消耗估算断货天数
// ==========================================

use crate::domain::{RecommendationCandidate, RecommendationType, Severity};
use crate::repository::RepositoryResult;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};

/// 断货天数哨兵值: 无消耗历史时按"远期"处理, 不做除零
pub const STOCKOUT_SENTINEL_DAYS: f64 = 999.0;

/// 低库存行
#[derive(Debug, Clone, PartialEq)]
pub struct LowStockRow {
    pub drug_name: String,
    pub category: String,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub unit_price: f64,
    pub shortage: i64,
    pub avg_daily_consumption: f64,
}

/// 分析: 低于最低库存线的条目
///
/// LEFT JOIN 消耗记录以容忍无历史的新药品, 平均消耗缺省为 0。
/// 按缺口降序, 最多 20 行。
pub fn analyze(conn: &Connection, today: NaiveDate) -> RepositoryResult<Vec<LowStockRow>> {
    let window_start = today - Duration::days(30);

    let mut stmt = conn.prepare(
        r#"
        SELECT i.drug_name, i.category, i.current_stock, i.minimum_stock,
               i.unit_price, (i.minimum_stock - i.current_stock) AS shortage,
               COALESCE(AVG(cp.quantity_consumed), 0) AS avg_daily_consumption
        FROM inventory i
        LEFT JOIN consumption_patterns cp ON i.id = cp.drug_id
          AND cp.date >= ?1
        WHERE i.current_stock < i.minimum_stock
        GROUP BY i.id, i.drug_name, i.category, i.current_stock, i.minimum_stock, i.unit_price
        ORDER BY shortage DESC
        LIMIT 20
    "#,
    )?;

    let rows = stmt
        .query_map(params![window_start], |row| {
            Ok(LowStockRow {
                drug_name: row.get(0)?,
                category: row.get(1)?,
                current_stock: row.get(2)?,
                minimum_stock: row.get(3)?,
                unit_price: row.get(4)?,
                shortage: row.get(5)?,
                avg_daily_consumption: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// 生成: 紧急补货建议
///
/// 决策表（驱动指标: 断货天数）:
/// - < 3 天  -> Critical / 基础分 98
/// - < 7 天  -> High / 基础分 92
/// - 其余    -> Medium / 基础分 85
pub fn generate(rows: &[LowStockRow]) -> Vec<RecommendationCandidate> {
    rows.iter()
        .map(|row| {
            let days_until_stockout = if row.avg_daily_consumption > 0.0 {
                row.current_stock as f64 / row.avg_daily_consumption
            } else {
                STOCKOUT_SENTINEL_DAYS
            };

            let (urgency, base_score) = if days_until_stockout < 3.0 {
                (Severity::Critical, 98.0)
            } else if days_until_stockout < 7.0 {
                (Severity::High, 92.0)
            } else {
                (Severity::Medium, 85.0)
            };

            RecommendationCandidate {
                rec_type: RecommendationType::Restock,
                category: "Inventory Management".to_string(),
                title: format!("⚠️ URGENT: Restock {}", row.drug_name),
                description: format!(
                    "Critical shortage: Current stock ({} units) is {} units below minimum. \
                     Daily consumption: {:.1} units. Stockout in {:.0} days.",
                    row.current_stock, row.shortage, row.avg_daily_consumption, days_until_stockout
                ),
                action: format!(
                    "Place immediate purchase order for {} units",
                    row.shortage * 2
                ),
                impact: Severity::Critical,
                urgency,
                estimated_cost: row.unit_price * row.shortage as f64 * 2.0,
                estimated_savings: row.unit_price * row.shortage as f64 * 3.0,
                priority_score: base_score,
                days_until_impact: days_until_stockout as i64,
                roi_ratio: 0.0,
            }
        })
        .collect()
}
