// ==========================================
// 药房库存决策支持系统 - RecommendationApi Trait 与实现
// ==========================================
// 职责: 建议列表的对外查询入口
// ==========================================

use crate::api::dto::{
    GetRecommendationsRequest, RecommendationDto, RecommendationListResponse,
};
use crate::engine::{RecommendationEngine, MAX_RECOMMENDATIONS};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

/// RecommendationApi trait
///
/// 提供建议列表查询:
/// - 输入: 快照日期（缺省当日）与条数限制
/// - 输出: 按最终分降序的建议 DTO 列表
///
/// # 示例
/// ```ignore
/// let request = GetRecommendationsRequest {
///     as_of_date: Some("2026-08-07".to_string()),
///     limit: Some(10),
/// };
/// let response = api.get_recommendations(request)?;
/// ```
pub trait RecommendationApi: Send + Sync {
    /// 查询建议列表
    ///
    /// # 返回
    /// - 成功: 建议列表响应（run_id + 快照日期 + DTO 列表）
    /// - 失败: 错误消息
    fn get_recommendations(
        &self,
        request: GetRecommendationsRequest,
    ) -> Result<RecommendationListResponse, String>;
}

/// RecommendationApi 实现
pub struct RecommendationApiImpl {
    /// 建议引擎
    engine: Arc<RecommendationEngine>,
}

impl RecommendationApiImpl {
    /// 创建新的 API 实例
    pub fn new(engine: Arc<RecommendationEngine>) -> Self {
        Self { engine }
    }

    /// 解析快照日期, 缺省为当日
    fn resolve_as_of(as_of_date: Option<&str>) -> Result<NaiveDate, String> {
        match as_of_date {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| format!("无效的快照日期 '{}': {}", raw, e)),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }
}

impl RecommendationApi for RecommendationApiImpl {
    fn get_recommendations(
        &self,
        request: GetRecommendationsRequest,
    ) -> Result<RecommendationListResponse, String> {
        let as_of = Self::resolve_as_of(request.as_of_date.as_deref())?;

        // 条数上限是输出契约的一部分, 请求只能收紧不能放宽
        let limit = request
            .limit
            .map(|n| n as usize)
            .unwrap_or(MAX_RECOMMENDATIONS)
            .min(MAX_RECOMMENDATIONS);

        let ranked = self
            .engine
            .generate_recommendations(as_of)
            .map_err(|e| format!("生成建议列表失败: {}", e))?;

        let items: Vec<RecommendationDto> =
            ranked.iter().take(limit).map(RecommendationDto::from).collect();

        Ok(RecommendationListResponse {
            run_id: Uuid::new_v4().to_string(),
            as_of: as_of.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_count: items.len() as u32,
            items,
        })
    }
}
