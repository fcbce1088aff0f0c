// ==========================================
// 药房库存决策支持系统 - 建议排序器
// ==========================================
// 职责: 按最终分降序稳定排序并截断
// 红线: 纯函数, 不改写任何分数; 并列分数保持输入次序
// ==========================================

use crate::domain::RecommendationCandidate;

/// 输出列表的条数上限
pub const MAX_RECOMMENDATIONS: usize = 20;

/// 排序并截断
///
/// sort_by 是稳定排序, total_cmp 给出确定的全序,
/// 因此同一输入必然产出同一输出。
pub fn rank(mut candidates: Vec<RecommendationCandidate>) -> Vec<RecommendationCandidate> {
    candidates.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}
