// ==========================================
// 药房库存决策支持系统 - 需求增长信号
// ==========================================
// 职责: 回答"哪些药品需求在加速", 产出加库机会建议
// 口径: 近 30 天消耗 > 前 30 天 × 1.2 且近 30 天 > 10 单位
// ==========================================

use crate::domain::{RecommendationCandidate, RecommendationType, Severity};
use crate::repository::RepositoryResult;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};

/// 需求增长行
#[derive(Debug, Clone, PartialEq)]
pub struct HighDemandRow {
    pub drug_name: String,
    pub category: String,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub unit_price: f64,
    pub last_30d: f64,
    pub prev_30d: f64,
}

/// 分析: 需求增长条目
///
/// INNER JOIN: 只考察 60 天内有消耗记录的条目。
/// 按绝对增量降序, 最多 15 行。
pub fn analyze(conn: &Connection, today: NaiveDate) -> RepositoryResult<Vec<HighDemandRow>> {
    let last_window_start = today - Duration::days(30);
    let prev_window_start = today - Duration::days(60);

    let mut stmt = conn.prepare(
        r#"
        SELECT i.drug_name, i.category, i.current_stock, i.minimum_stock, i.unit_price,
               SUM(CASE WHEN cp.date >= ?1 THEN cp.quantity_consumed ELSE 0 END) AS last_30d,
               SUM(CASE WHEN cp.date >= ?2 AND cp.date < ?1
                   THEN cp.quantity_consumed ELSE 0 END) AS prev_30d
        FROM inventory i
        JOIN consumption_patterns cp ON i.id = cp.drug_id
        WHERE cp.date >= ?2
        GROUP BY i.id, i.drug_name, i.category, i.current_stock, i.minimum_stock, i.unit_price
        HAVING last_30d > prev_30d * 1.2 AND last_30d > 10
        ORDER BY (last_30d - prev_30d) DESC
        LIMIT 15
    "#,
    )?;

    let rows = stmt
        .query_map(params![last_window_start, prev_window_start], |row| {
            Ok(HighDemandRow {
                drug_name: row.get(0)?,
                category: row.get(1)?,
                current_stock: row.get(2)?,
                minimum_stock: row.get(3)?,
                unit_price: row.get(4)?,
                last_30d: row.get(5)?,
                prev_30d: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// 生成: 需求增长加库建议
///
/// 固定 High 影响 / Medium 紧急 / 基础分 78;
/// 增长率分母加 1, 前 30 天为 0 时不做除零。
pub fn generate(rows: &[HighDemandRow]) -> Vec<RecommendationCandidate> {
    rows.iter()
        .map(|row| {
            let growth_rate = (row.last_30d - row.prev_30d) / (row.prev_30d + 1.0) * 100.0;
            let revenue_opportunity =
                row.last_30d * row.unit_price * (growth_rate / 100.0) * 3.0;

            RecommendationCandidate {
                rec_type: RecommendationType::IncreaseStock,
                category: "Growth Opportunity".to_string(),
                title: format!("📈 Capitalize on growing demand: {}", row.drug_name),
                description: format!(
                    "Strong growth: +{:.1}% demand increase (from {:.0} to {:.0} units). \
                     Revenue opportunity: ¥{:.2} over next quarter.",
                    growth_rate, row.prev_30d, row.last_30d, revenue_opportunity
                ),
                action: format!(
                    "Increase minimum stock from {} to {} units. Secure additional supply.",
                    row.minimum_stock,
                    (row.minimum_stock as f64 * 1.5) as i64
                ),
                impact: Severity::High,
                urgency: Severity::Medium,
                estimated_cost: row.minimum_stock as f64 * row.unit_price * 0.5,
                estimated_savings: revenue_opportunity * 0.25,
                priority_score: 78.0,
                days_until_impact: 30,
                roi_ratio: 0.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn row(last: f64, prev: f64) -> HighDemandRow {
        HighDemandRow {
            drug_name: "Oseltamivir 75mg".to_string(),
            category: "Antiviral".to_string(),
            current_stock: 40,
            minimum_stock: 20,
            unit_price: 15.0,
            last_30d: last,
            prev_30d: prev,
        }
    }

    #[test]
    fn test_growth_rate_formula() {
        // (60 - 40) / (40 + 1) * 100 ≈ 48.8%
        let recs = generate(&[row(60.0, 40.0)]);
        assert!(recs[0].description.contains("+48.8%"));
        assert_eq!(recs[0].priority_score, 78.0);
        assert_eq!(recs[0].impact, Severity::High);
        assert_eq!(recs[0].urgency, Severity::Medium);
        assert_eq!(recs[0].days_until_impact, 30);
    }

    #[test]
    fn test_zero_previous_window_guarded() {
        // prev=0 时分母为 1, 不除零: (30 - 0) / 1 * 100 = 3000%
        let recs = generate(&[row(30.0, 0.0)]);
        assert!(recs[0].estimated_savings.is_finite());
        assert!(recs[0].description.contains("+3000.0%"));
    }

    #[test]
    fn test_action_raises_minimum_stock() {
        let recs = generate(&[row(60.0, 40.0)]);
        assert!(recs[0]
            .action
            .contains("Increase minimum stock from 20 to 30 units"));
        // cost = 20 * 15 * 0.5
        assert_eq!(recs[0].estimated_cost, 150.0);
    }

    #[test]
    fn test_analyze_growth_filter() {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();

        // A: last=30, prev=10 -> 入选 (30 > 12 且 30 > 10)
        // B: last=11, prev=10 -> 不入选 (11 <= 12)
        // C: last=8, prev=2 -> 不入选 (8 <= 10)
        conn.execute_batch(
            r#"
            INSERT INTO inventory (id, drug_name, category, current_stock, minimum_stock, unit_price)
            VALUES (1, 'A', 'X', 40, 20, 5.0),
                   (2, 'B', 'X', 40, 20, 5.0),
                   (3, 'C', 'X', 40, 20, 5.0);
            INSERT INTO consumption_patterns (drug_id, date, quantity_consumed)
            VALUES (1, '2026-08-01', 30.0),
                   (1, '2026-06-20', 10.0),
                   (2, '2026-08-01', 11.0),
                   (2, '2026-06-20', 10.0),
                   (3, '2026-08-01', 8.0),
                   (3, '2026-06-20', 2.0);
            "#,
        )
        .unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let rows = analyze(&conn, today).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].drug_name, "A");
        assert_eq!(rows[0].last_30d, 30.0);
        assert_eq!(rows[0].prev_30d, 10.0);
    }

    #[test]
    fn test_analyze_ignores_records_outside_60_days() {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();

        conn.execute_batch(
            r#"
            INSERT INTO inventory (id, drug_name, category, current_stock, minimum_stock, unit_price)
            VALUES (1, 'A', 'X', 40, 20, 5.0);
            INSERT INTO consumption_patterns (drug_id, date, quantity_consumed)
            VALUES (1, '2026-08-01', 30.0),
                   (1, '2026-03-01', 500.0);
            "#,
        )
        .unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let rows = analyze(&conn, today).unwrap();

        // 3 月的记录在 60 天窗口外, prev_30d 应为 0
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].prev_30d, 0.0);
    }
}
