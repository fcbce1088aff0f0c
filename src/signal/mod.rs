// ==========================================
// 药房库存决策支持系统 - 信号层
// ==========================================
// 职责: 七类库存信号的分析与建议生成
// 架构原则:
// - 每个信号 = 一次窗口化聚合读 (analyze) + 一次行到候选的映射 (generate)
// - 信号集合是封闭枚举, 不做开放式继承
// - 分析器之间相互独立, 单个信号失败不影响其余信号
// ==========================================

pub mod expiring;
pub mod high_demand;
pub mod low_stock;
pub mod overstock;
pub mod seasonal;
pub mod slow_mover;
pub mod supplier;

use crate::config::AnalyzerPolicy;
use crate::domain::RecommendationCandidate;
use crate::repository::RepositoryResult;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::fmt;

// ==========================================
// SignalKind - 信号类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// 低库存（缺货风险）
    LowStock,
    /// 临近效期（报废风险）
    Expiring,
    /// 压库（资金占用）
    Overstock,
    /// 滞销（低周转）
    SlowMover,
    /// 需求增长
    HighDemand,
    /// 季节性峰值
    Seasonal,
    /// 供应商绩效
    SupplierPerformance,
}

impl SignalKind {
    /// 全部信号, 按固定顺序（决定并列分数时的输出次序）
    pub const ALL: [SignalKind; 7] = [
        SignalKind::LowStock,
        SignalKind::Expiring,
        SignalKind::Overstock,
        SignalKind::SlowMover,
        SignalKind::HighDemand,
        SignalKind::Seasonal,
        SignalKind::SupplierPerformance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::LowStock => "low_stock",
            SignalKind::Expiring => "expiring",
            SignalKind::Overstock => "overstock",
            SignalKind::SlowMover => "slow_mover",
            SignalKind::HighDemand => "high_demand",
            SignalKind::Seasonal => "seasonal",
            SignalKind::SupplierPerformance => "supplier_performance",
        }
    }

    /// 执行单个信号: analyze -> generate
    ///
    /// # 参数
    /// - `conn`: 数据库连接（只读使用）
    /// - `today`: 快照日期, 所有时间窗口以此为基准
    /// - `policy`: 分析器策略常量
    ///
    /// # 返回
    /// 该信号的候选列表（基础分已写入, 未经过评分阶段）
    pub fn run(
        &self,
        conn: &Connection,
        today: NaiveDate,
        policy: &AnalyzerPolicy,
    ) -> RepositoryResult<Vec<RecommendationCandidate>> {
        match self {
            SignalKind::LowStock => {
                let rows = low_stock::analyze(conn, today)?;
                Ok(low_stock::generate(&rows))
            }
            SignalKind::Expiring => {
                let rows = expiring::analyze(conn, today)?;
                Ok(expiring::generate(&rows))
            }
            SignalKind::Overstock => {
                let rows = overstock::analyze(conn, today, policy)?;
                Ok(overstock::generate(&rows))
            }
            SignalKind::SlowMover => {
                let rows = slow_mover::analyze(conn, today, policy)?;
                Ok(slow_mover::generate(&rows, policy.slow_mover_window_days))
            }
            SignalKind::HighDemand => {
                let rows = high_demand::analyze(conn, today)?;
                Ok(high_demand::generate(&rows))
            }
            SignalKind::Seasonal => {
                let rows = seasonal::analyze(conn, today)?;
                Ok(seasonal::generate(&rows))
            }
            SignalKind::SupplierPerformance => {
                let rows = supplier::analyze(conn)?;
                Ok(supplier::generate(&rows))
            }
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
