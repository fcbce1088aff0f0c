// ==========================================
// 药房库存决策支持系统 - 库存领域模型
// ==========================================
// 用途: 外部存储协作方的只读映射
// 对齐: db::init_schema 的 inventory / consumption_patterns / suppliers 表
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryItem - 库存条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// 条目唯一标识
    pub id: i64,

    /// 药品名称
    pub drug_name: String,

    /// 药品分类
    pub category: String,

    /// 当前库存（非负）
    pub current_stock: i64,

    /// 最低库存线（非负）
    pub minimum_stock: i64,

    /// 单价（非负）
    pub unit_price: f64,

    /// 效期（可空）
    pub expiry_date: Option<NaiveDate>,

    /// 供应商引用（可空）
    pub supplier_id: Option<i64>,
}

impl InventoryItem {
    /// 是否低于最低库存线
    pub fn is_below_minimum(&self) -> bool {
        self.current_stock < self.minimum_stock
    }

    /// 当前库存占用的资金
    pub fn stock_value(&self) -> f64 {
        self.current_stock as f64 * self.unit_price
    }
}

// ==========================================
// ConsumptionRecord - 消耗记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    /// 药品引用
    pub drug_id: i64,

    /// 消耗日期
    pub date: NaiveDate,

    /// 消耗数量（非负）
    pub quantity_consumed: f64,

    /// 消耗科室（可空）
    pub department: Option<String>,
}

// ==========================================
// Supplier - 供应商
// ==========================================
// 评分口径: reliability / quality / cost_rating 均为 0-5
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    /// 供应商唯一标识
    pub id: i64,

    /// 供应商名称
    pub name: String,

    /// 履约可靠性评分 (0-5)
    pub reliability_score: f64,

    /// 质量评分 (0-5)
    pub quality_score: f64,

    /// 成本评分 (0-5)
    pub cost_rating: f64,

    /// 交付周期（天，非负）
    pub lead_time_days: i64,
}

impl Supplier {
    /// 可靠性与质量的均值（越低越差，用于问题供应商排序）
    pub fn performance_index(&self) -> f64 {
        (self.reliability_score + self.quality_score) / 2.0
    }
}
