// ==========================================
// 药房库存决策支持系统 - 领域类型定义
// ==========================================
// 红线: 等级制是封闭集合，不是开放字符串
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 业务严重度 (Severity)
// ==========================================
// 用于 impact / urgency 两个维度的序数分级,
// 驱动评分阶段的乘数查表, 不是计算出的指标
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// 对外展示用标签
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 建议类型 (Recommendation Type)
// ==========================================
// 七类信号一一对应, 封闭集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    /// 紧急补货
    Restock,
    /// 效期预警
    ExpiryAlert,
    /// 压库降量
    ReduceStock,
    /// 滞销复核
    SlowMover,
    /// 需求增长加库
    IncreaseStock,
    /// 季节性机会
    Seasonal,
    /// 供应商复核
    SupplierReview,
}

impl RecommendationType {
    /// 线上标签（与序列化 tag 一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Restock => "RESTOCK",
            RecommendationType::ExpiryAlert => "EXPIRY_ALERT",
            RecommendationType::ReduceStock => "REDUCE_STOCK",
            RecommendationType::SlowMover => "SLOW_MOVER",
            RecommendationType::IncreaseStock => "INCREASE_STOCK",
            RecommendationType::Seasonal => "SEASONAL",
            RecommendationType::SupplierReview => "SUPPLIER_REVIEW",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
