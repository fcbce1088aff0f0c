// ==========================================
// 药房库存决策支持系统 - RecommendationApi DTO 定义
// ==========================================
// 职责: 定义建议查询的请求和响应结构
// ==========================================

use crate::domain::RecommendationCandidate;
use serde::{Deserialize, Serialize};

// ==========================================
// get_recommendations - 建议列表查询
// ==========================================

/// 请求: 查询建议列表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetRecommendationsRequest {
    /// 快照日期（可选, ISO DATE: YYYY-MM-DD, 缺省为当日）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of_date: Option<String>,

    /// 返回条数限制（可选, 默认 20, 上限 20）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// 响应: 建议列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationListResponse {
    /// 本次运行标识（外部缓存可据此为一次快照运行建键）
    pub run_id: String,

    /// 快照日期 (YYYY-MM-DD)
    pub as_of: String,

    /// 生成时间戳 (ISO 8601)
    pub generated_at: String,

    /// 建议列表（按最终分降序）
    pub items: Vec<RecommendationDto>,

    /// 总条数
    pub total_count: u32,
}

/// 建议条目 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationDto {
    /// 建议类型 (RESTOCK | EXPIRY_ALERT | REDUCE_STOCK | SLOW_MOVER |
    /// INCREASE_STOCK | SEASONAL | SUPPLIER_REVIEW)
    pub rec_type: String,

    /// 业务分类标签
    pub category: String,

    /// 标题
    pub title: String,

    /// 描述
    pub description: String,

    /// 建议动作
    pub action: String,

    /// 影响程度 ("Critical" | "High" | "Medium" | "Low")
    pub impact: String,

    /// 紧急程度 ("Critical" | "High" | "Medium" | "Low")
    pub urgency: String,

    /// 预计执行成本
    pub estimated_cost: f64,

    /// 预计收益/避损
    pub estimated_savings: f64,

    /// 最终优先级分数（只读, 消费方不得改写）
    pub priority_score: f64,

    /// 距影响发生的天数
    pub days_until_impact: i64,

    /// 投入产出比（展示口径, >= 0）
    pub roi_ratio: f64,
}

impl From<&RecommendationCandidate> for RecommendationDto {
    fn from(rec: &RecommendationCandidate) -> Self {
        Self {
            rec_type: rec.rec_type.as_str().to_string(),
            category: rec.category.clone(),
            title: rec.title.clone(),
            description: rec.description.clone(),
            action: rec.action.clone(),
            impact: rec.impact.as_str().to_string(),
            urgency: rec.urgency.as_str().to_string(),
            estimated_cost: rec.estimated_cost,
            estimated_savings: rec.estimated_savings,
            priority_score: rec.priority_score,
            days_until_impact: rec.days_until_impact,
            roi_ratio: rec.roi_ratio,
        }
    }
}
