// ==========================================
// 药房库存决策支持系统 - 建议候选模型
// ==========================================
// 职责: 生成器与评分器之间的工作单元
// 红线: priority_score 由生成器给出基础分, 仅评分阶段做一次性乘法调整,
//       排序与输出阶段不得再改写
// ==========================================

use crate::domain::types::{RecommendationType, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 建议候选
///
/// 每个信号分析器的一行合格实体映射为一条候选。
/// 字段均为普通值, 不持有任何指回存储层的引用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationCandidate {
    /// 建议类型
    pub rec_type: RecommendationType,

    /// 业务分类标签（面向看板展示）
    pub category: String,

    /// 标题
    pub title: String,

    /// 描述（含关键指标的叙述性文字）
    pub description: String,

    /// 建议动作（自由文本）
    pub action: String,

    /// 影响程度
    pub impact: Severity,

    /// 紧急程度
    pub urgency: Severity,

    /// 预计执行成本（≥0）
    pub estimated_cost: f64,

    /// 预计收益/避损（≥0）
    pub estimated_savings: f64,

    /// 优先级分数: 生成器写入基础分, 评分阶段原地调整为最终分
    pub priority_score: f64,

    /// 距影响发生的天数（≥0）
    pub days_until_impact: i64,

    /// 投入产出比（评分阶段写入, 展示口径 max(roi, 0)）
    pub roi_ratio: f64,
}

impl fmt::Display for RecommendationCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (score: {:.1}, {}/{})",
            self.rec_type, self.title, self.priority_score, self.impact, self.urgency
        )
    }
}
