// ==========================================
// 药房库存决策支持系统 - 优先级评分器
// ==========================================
// 职责: 对候选列表施加乘法调整模型
// 公式: 最终分 = 基础分 × 影响乘数 × 紧急乘数 × ROI乘数 × 时间乘数
// 红线: 无状态, 候选之间相互独立, 同输入必同输出
// ==========================================

use crate::domain::{RecommendationCandidate, Severity};

/// 影响程度乘数表
fn impact_multiplier(impact: Severity) -> f64 {
    match impact {
        Severity::Critical => 1.5,
        Severity::High => 1.3,
        Severity::Medium => 1.0,
        Severity::Low => 0.7,
    }
}

/// 紧急程度乘数表
fn urgency_multiplier(urgency: Severity) -> f64 {
    match urgency {
        Severity::Critical => 1.6,
        Severity::High => 1.3,
        Severity::Medium => 1.0,
        Severity::Low => 0.6,
    }
}

/// ROI 及其乘数
///
/// cost = 0 时 roi 取 0（不除零）, 乘数夹在 [0.5, 1.5]。
fn roi_and_multiplier(cost: f64, savings: f64) -> (f64, f64) {
    let roi = if cost > 0.0 { (savings - cost) / cost } else { 0.0 };
    let multiplier = (1.0 + roi * 0.1).clamp(0.5, 1.5);
    (roi, multiplier)
}

/// 时间紧迫度乘数
fn time_urgency_multiplier(days_until_impact: i64) -> f64 {
    if days_until_impact < 7 {
        1.4
    } else if days_until_impact < 30 {
        1.2
    } else {
        1.0
    }
}

/// 对候选列表原地评分
///
/// 每条候选的 priority_score 由基础分一次性调整为最终分,
/// roi_ratio 写入 max(roi, 0) 的展示口径。
pub fn score_candidates(candidates: &mut [RecommendationCandidate]) {
    for rec in candidates.iter_mut() {
        let (roi, roi_mult) = roi_and_multiplier(rec.estimated_cost, rec.estimated_savings);

        rec.priority_score = rec.priority_score
            * impact_multiplier(rec.impact)
            * urgency_multiplier(rec.urgency)
            * roi_mult
            * time_urgency_multiplier(rec.days_until_impact);

        rec.roi_ratio = roi.max(0.0);
    }
}
