// ==========================================
// 药房库存决策支持系统 - 临近效期信号
// ==========================================
// 职责: 回答"哪些药品将在 90 天内到期", 产出减损建议
// 口径: days_to_expiry ∈ [0, 90] 且有库存; 预期报废 = 库存 - 可售出量
// ==========================================

use crate::domain::{RecommendationCandidate, RecommendationType, Severity};
use crate::repository::RepositoryResult;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};

/// 临近效期行
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiringRow {
    pub drug_name: String,
    pub category: String,
    pub current_stock: i64,
    pub unit_price: f64,
    pub days_to_expiry: i64,
    pub potential_loss: f64,
    pub avg_daily_consumption: f64,
}

/// 分析: 90 天内到期且仍有库存的条目
///
/// days_to_expiry 以快照日期为基准按日截断。
/// 按到期天数升序（最紧急在前）, 最多 20 行。
pub fn analyze(conn: &Connection, today: NaiveDate) -> RepositoryResult<Vec<ExpiringRow>> {
    let window_start = today - Duration::days(30);

    let mut stmt = conn.prepare(
        r#"
        SELECT i.drug_name, i.category, i.current_stock, i.unit_price,
               CAST(julianday(i.expiry_date) - julianday(?1) AS INTEGER) AS days_to_expiry,
               (i.current_stock * i.unit_price) AS potential_loss,
               COALESCE(AVG(cp.quantity_consumed), 0) AS avg_daily_consumption
        FROM inventory i
        LEFT JOIN consumption_patterns cp ON i.id = cp.drug_id
          AND cp.date >= ?2
        WHERE i.expiry_date IS NOT NULL
          AND julianday(i.expiry_date) - julianday(?1) BETWEEN 0 AND 90
          AND i.current_stock > 0
        GROUP BY i.id, i.drug_name, i.category, i.current_stock, i.unit_price, i.expiry_date
        ORDER BY days_to_expiry
        LIMIT 20
    "#,
    )?;

    let rows = stmt
        .query_map(params![today, window_start], |row| {
            Ok(ExpiringRow {
                drug_name: row.get(0)?,
                category: row.get(1)?,
                current_stock: row.get(2)?,
                unit_price: row.get(3)?,
                days_to_expiry: row.get(4)?,
                potential_loss: row.get(5)?,
                avg_daily_consumption: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// 生成: 效期减损建议
///
/// 决策表（驱动指标: 到期天数）:
/// - <= 15 -> Critical / 96, 立即折价或调拨
/// - <= 30 -> High / 88, 促销定价
/// - <= 60 -> Medium / 70, 密切监控
/// - 其余  -> Low / 55, 常规运营
pub fn generate(rows: &[ExpiringRow]) -> Vec<RecommendationCandidate> {
    rows.iter()
        .map(|row| {
            let consumption_rate = row.avg_daily_consumption;
            let can_sell = if consumption_rate > 0.0 {
                consumption_rate * row.days_to_expiry as f64
            } else {
                0.0
            };
            let expected_wastage = (row.current_stock as f64 - can_sell).max(0.0);

            let (urgency, base_score, action) = if row.days_to_expiry <= 15 {
                (
                    Severity::Critical,
                    96.0,
                    "IMMEDIATE: Discount 30-40% or transfer to high-demand location".to_string(),
                )
            } else if row.days_to_expiry <= 30 {
                (
                    Severity::High,
                    88.0,
                    "Implement promotional pricing (20-25% discount)".to_string(),
                )
            } else if row.days_to_expiry <= 60 {
                (
                    Severity::Medium,
                    70.0,
                    "Monitor closely and plan promotional activities".to_string(),
                )
            } else {
                (
                    Severity::Low,
                    55.0,
                    "Continue normal operations with regular monitoring".to_string(),
                )
            };

            let impact = if row.potential_loss > 1000.0 {
                Severity::High
            } else {
                Severity::Medium
            };

            RecommendationCandidate {
                rec_type: RecommendationType::ExpiryAlert,
                category: "Wastage Prevention".to_string(),
                title: format!("⏰ {} expiring in {} days", row.drug_name, row.days_to_expiry),
                description: format!(
                    "{} units will expire. Daily consumption: {:.1} units. \
                     Expected wastage: {:.0} units (¥{:.2})",
                    row.current_stock,
                    consumption_rate,
                    expected_wastage,
                    expected_wastage * row.unit_price
                ),
                action,
                impact,
                urgency,
                estimated_cost: 0.0,
                estimated_savings: expected_wastage * row.unit_price * 0.7,
                priority_score: base_score,
                days_until_impact: row.days_to_expiry,
                roi_ratio: 0.0,
            }
        })
        .collect()
}
