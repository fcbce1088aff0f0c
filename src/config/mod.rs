// ==========================================
// 药房库存决策支持系统 - 配置层
// ==========================================
// 职责: 分析器策略常量管理, 支持 config_kv 覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, AnalyzerPolicy, ConfigManager};
