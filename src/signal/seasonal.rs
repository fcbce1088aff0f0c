// ==========================================
// 药房库存决策支持系统 - 季节性信号
// ==========================================
// 职责: 回答"哪些药品处于季节性峰值", 产出备货机会建议
// 口径: 近 365 天内, 当前日历月的均值超过整体均值 30% 以上
// 说明: 当月均值按"非当月记录计 0"在全部行上取均值, 跨年合并计算,
//       与历史口径保持一致, 不做跨年分离
// ==========================================

use crate::domain::{RecommendationCandidate, RecommendationType, Severity};
use crate::repository::RepositoryResult;
use chrono::{Datelike, Duration, NaiveDate};
use rusqlite::{params, Connection};

/// 季节性行
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalRow {
    pub drug_name: String,
    pub category: String,
    pub current_month_avg: f64,
    pub overall_avg: f64,
}

/// 分析: 季节性峰值条目
///
/// 按当月均值与整体均值的差值降序, 最多 10 行。
/// 零填充口径下, 整体均值含当月贡献; 只有消耗记录中存在
/// 负数修正（退货/冲账）压低整体均值时, 预设阈值才会命中。
pub fn analyze(conn: &Connection, today: NaiveDate) -> RepositoryResult<Vec<SeasonalRow>> {
    let window_start = today - Duration::days(365);
    // strftime('%m') 产出两位月份, 参数需补零对齐
    let current_month = format!("{:02}", today.month());

    let mut stmt = conn.prepare(
        r#"
        SELECT i.drug_name, i.category,
               AVG(CASE WHEN strftime('%m', cp.date) = ?1
                   THEN cp.quantity_consumed ELSE 0 END) AS current_month_avg,
               AVG(cp.quantity_consumed) AS overall_avg
        FROM inventory i
        JOIN consumption_patterns cp ON i.id = cp.drug_id
        WHERE cp.date >= ?2
        GROUP BY i.id, i.drug_name, i.category
        HAVING current_month_avg > overall_avg * 1.3
        ORDER BY (current_month_avg - overall_avg) DESC
        LIMIT 10
    "#,
    )?;

    let rows = stmt
        .query_map(params![current_month, window_start], |row| {
            Ok(SeasonalRow {
                drug_name: row.get(0)?,
                category: row.get(1)?,
                current_month_avg: row.get(2)?,
                overall_avg: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// 生成: 季节性备货建议
///
/// 固定 Medium/Medium/基础分 68; 整体均值为 0 时季节系数取 1。
pub fn generate(rows: &[SeasonalRow]) -> Vec<RecommendationCandidate> {
    rows.iter()
        .map(|row| {
            let seasonal_factor = if row.overall_avg > 0.0 {
                row.current_month_avg / row.overall_avg
            } else {
                1.0
            };

            RecommendationCandidate {
                rec_type: RecommendationType::Seasonal,
                category: "Seasonal Opportunity".to_string(),
                title: format!("🌟 Seasonal peak for {}", row.drug_name),
                description: format!(
                    "Current month shows {:.1}x higher demand. Historical average: {:.1} units, \
                     Current month: {:.1} units.",
                    seasonal_factor, row.overall_avg, row.current_month_avg
                ),
                action: format!(
                    "Increase inventory by {}% to meet seasonal demand.",
                    ((seasonal_factor - 1.0) * 100.0) as i64
                ),
                impact: Severity::Medium,
                urgency: Severity::Medium,
                estimated_cost: row.current_month_avg * 5.0,
                estimated_savings: row.current_month_avg * 8.0,
                priority_score: 68.0,
                days_until_impact: 15,
                roi_ratio: 0.0,
            }
        })
        .collect()
}
