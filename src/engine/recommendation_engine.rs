// ==========================================
// 药房库存决策支持系统 - 建议引擎编排器
// ==========================================
// 职责: 七个信号的单遍管线: 分析 -> 生成 -> 评分 -> 排序
// 架构原则:
// - 每次调用基于当时的数据快照全量重算, 调用之间不保留任何状态
// - 单个信号失败只损失该信号的候选, 管线整体永不因此失败
// ==========================================

use crate::config::AnalyzerPolicy;
use crate::domain::RecommendationCandidate;
use crate::engine::{ranker, scorer};
use crate::repository::{RepositoryError, RepositoryResult};
use crate::signal::SignalKind;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// 建议引擎
pub struct RecommendationEngine {
    /// 数据库连接（只读使用）
    conn: Arc<Mutex<Connection>>,

    /// 分析器策略常量
    policy: AnalyzerPolicy,
}

impl RecommendationEngine {
    /// 创建新的建议引擎
    pub fn new(conn: Arc<Mutex<Connection>>, policy: AnalyzerPolicy) -> Self {
        Self { conn, policy }
    }

    /// 使用默认策略创建
    pub fn with_default_policy(conn: Arc<Mutex<Connection>>) -> Self {
        Self::new(conn, AnalyzerPolicy::default())
    }

    /// 当前生效的策略
    pub fn policy(&self) -> &AnalyzerPolicy {
        &self.policy
    }

    /// 生成一次建议列表
    ///
    /// # 参数
    /// - `today`: 快照日期, 所有窗口与效期计算以此为基准
    ///
    /// # 返回
    /// 按最终分降序的建议列表, 最多 20 条。
    /// 单个信号失败记入告警日志并跳过, 不中断整体运行。
    pub fn generate_recommendations(
        &self,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<RecommendationCandidate>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(format!("锁获取失败: {}", e)))?;

        let mut candidates = Vec::new();

        for kind in SignalKind::ALL {
            match kind.run(&conn, today, &self.policy) {
                Ok(mut batch) => {
                    tracing::debug!(signal = %kind, count = batch.len(), "信号分析完成");
                    candidates.append(&mut batch);
                }
                Err(e) => {
                    // 失败的信号贡献零条候选, 其余信号照常输出
                    tracing::warn!(signal = %kind, error = %e, "信号分析失败, 跳过该信号");
                }
            }
        }

        drop(conn);

        scorer::score_candidates(&mut candidates);
        let ranked = ranker::rank(candidates);

        tracing::info!(count = ranked.len(), as_of = %today, "建议列表生成完成");

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_engine() -> RecommendationEngine {
        let conn = Connection::open_in_memory().unwrap();
        db::configure_sqlite_connection(&conn).unwrap();
        db::init_schema(&conn).unwrap();

        // 低库存 + 临近效期 + 问题供应商 三类信号的数据
        conn.execute_batch(
            r#"
            INSERT INTO inventory (id, drug_name, category, current_stock, minimum_stock, unit_price, expiry_date)
            VALUES (1, 'Amoxicillin 250mg', 'Antibiotic', 10, 50, 2.5, NULL),
                   (2, 'Insulin Glargine', 'Diabetes', 40, 10, 50.0, '2026-08-17');
            INSERT INTO consumption_patterns (drug_id, date, quantity_consumed)
            VALUES (1, '2026-08-01', 5.0),
                   (2, '2026-08-02', 0.5);
            INSERT INTO suppliers (id, name, reliability_score, quality_score, cost_rating, lead_time_days)
            VALUES (1, 'Shoddy Meds Ltd', 2.0, 2.5, 4.0, 15);
            "#,
        )
        .unwrap();

        RecommendationEngine::with_default_policy(Arc::new(Mutex::new(conn)))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn test_pipeline_produces_sorted_list() {
        let engine = setup_engine();
        let recs = engine.generate_recommendations(today()).unwrap();

        assert!(!recs.is_empty());
        assert!(recs.len() <= ranker::MAX_RECOMMENDATIONS);
        for pair in recs.windows(2) {
            assert!(pair[0].priority_score >= pair[1].priority_score);
        }
    }

    #[test]
    fn test_pipeline_idempotent() {
        let engine = setup_engine();
        let run1 = engine.generate_recommendations(today()).unwrap();
        let run2 = engine.generate_recommendations(today()).unwrap();
        assert_eq!(run1, run2);
    }

    #[test]
    fn test_pipeline_covers_multiple_signals() {
        let engine = setup_engine();
        let recs = engine.generate_recommendations(today()).unwrap();

        let types: std::collections::HashSet<_> = recs.iter().map(|r| r.rec_type).collect();
        assert!(types.len() >= 3);
    }

    #[test]
    fn test_pipeline_survives_missing_supplier_schema() {
        let conn = Connection::open_in_memory().unwrap();
        db::configure_sqlite_connection(&conn).unwrap();
        db::init_schema(&conn).unwrap();
        // 模拟旧库: 去掉 suppliers 表
        conn.execute_batch("DROP TABLE suppliers;").unwrap();

        conn.execute(
            "INSERT INTO inventory (id, drug_name, category, current_stock, minimum_stock, unit_price)
             VALUES (1, 'Amoxicillin 250mg', 'Antibiotic', 10, 50, 2.5)",
            [],
        )
        .unwrap();

        let engine = RecommendationEngine::with_default_policy(Arc::new(Mutex::new(conn)));
        let recs = engine.generate_recommendations(today()).unwrap();

        // 供应商信号静默缺席, 其余信号照常产出
        assert!(recs.iter().any(|r| r.title.contains("Amoxicillin")));
    }

    #[test]
    fn test_pipeline_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();

        let engine = RecommendationEngine::with_default_policy(Arc::new(Mutex::new(conn)));
        let recs = engine.generate_recommendations(today()).unwrap();
        assert!(recs.is_empty());
    }
}
