// ==========================================
// 药房库存决策支持系统 - 引擎层
// ==========================================
// 职责: 评分、排序与管线编排的业务规则
// 红线: 引擎不拼 SQL; priority_score 只在评分阶段调整一次
// ==========================================

pub mod ranker;
pub mod recommendation_engine;
pub mod scorer;

// 重导出核心引擎
pub use ranker::{rank, MAX_RECOMMENDATIONS};
pub use recommendation_engine::RecommendationEngine;
pub use scorer::score_candidates;
