// ==========================================
// 药房库存决策支持系统 - 供应商绩效信号
// ==========================================
// 职责: 回答"哪些供应商绩效不达标", 产出供应商复核建议
// 口径: 可靠性 < 3.5 或 质量 < 3.5 或 交付周期 > 10 天
// 红线: 供应商质量数据不可用(缺表/缺列)时降级为空结果, 不向上抛错
// ==========================================

use crate::domain::{RecommendationCandidate, RecommendationType, Severity};
use crate::repository::RepositoryResult;
use rusqlite::Connection;

/// 供应商绩效行
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierRow {
    pub name: String,
    pub reliability_score: f64,
    pub quality_score: f64,
    pub cost_rating: f64,
    pub lead_time_days: i64,
}

/// 分析: 绩效不达标的供应商
///
/// 按可靠性与质量均值升序（最差在前）, 最多 10 行。
/// 任何查询错误（典型为旧库缺 quality_score 列）降级为空结果并告警。
pub fn analyze(conn: &Connection) -> RepositoryResult<Vec<SupplierRow>> {
    match query_underperformers(conn) {
        Ok(rows) => Ok(rows),
        Err(e) => {
            tracing::warn!(error = %e, "供应商绩效查询失败, 降级为空结果");
            Ok(Vec::new())
        }
    }
}

fn query_underperformers(conn: &Connection) -> RepositoryResult<Vec<SupplierRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT s.name, s.reliability_score, s.quality_score, s.cost_rating,
               s.lead_time_days
        FROM suppliers s
        WHERE s.reliability_score < 3.5 OR s.quality_score < 3.5 OR s.lead_time_days > 10
        ORDER BY (s.reliability_score + s.quality_score) / 2
        LIMIT 10
    "#,
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(SupplierRow {
                name: row.get(0)?,
                reliability_score: row.get(1)?,
                quality_score: row.get(2)?,
                cost_rating: row.get(3)?,
                lead_time_days: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// 生成: 供应商复核建议
///
/// 固定 Medium 影响 / Low 紧急 / 基础分 50;
/// 问题清单由三个不达标维度拼装。
pub fn generate(rows: &[SupplierRow]) -> Vec<RecommendationCandidate> {
    rows.iter()
        .map(|row| {
            let mut issues = Vec::new();
            if row.reliability_score < 3.5 {
                issues.push(format!("Low reliability ({:.1}/5)", row.reliability_score));
            }
            if row.quality_score < 3.5 {
                issues.push(format!("Quality concerns ({:.1}/5)", row.quality_score));
            }
            if row.lead_time_days > 10 {
                issues.push(format!("Slow delivery ({} days)", row.lead_time_days));
            }

            RecommendationCandidate {
                rec_type: RecommendationType::SupplierReview,
                category: "Supplier Management".to_string(),
                title: format!("🔍 Review supplier: {}", row.name),
                description: format!(
                    "Performance issues: {}. Consider alternative suppliers.",
                    issues.join(", ")
                ),
                action: "Evaluate alternative suppliers and negotiate performance improvements"
                    .to_string(),
                impact: Severity::Medium,
                urgency: Severity::Low,
                estimated_cost: 500.0,
                estimated_savings: 2000.0,
                priority_score: 50.0,
                days_until_impact: 60,
                roi_ratio: 0.0,
            }
        })
        .collect()
}
