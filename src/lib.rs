// ==========================================
// 药房库存决策支持系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (建议仅供参考, 人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 仓储层 - 数据访问错误口径
pub mod repository;

// 信号层 - 七类库存信号的分析与生成
pub mod signal;

// 引擎层 - 评分/排序/编排
pub mod engine;

// 配置层 - 分析器策略常量
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ConsumptionRecord, InventoryItem, RecommendationCandidate, RecommendationType, Severity,
    Supplier,
};

// 信号
pub use signal::SignalKind;

// 引擎
pub use engine::{RecommendationEngine, MAX_RECOMMENDATIONS};

// 配置
pub use config::{AnalyzerPolicy, ConfigManager};

// API
pub use api::{
    GetRecommendationsRequest, RecommendationApi, RecommendationApiImpl,
    RecommendationListResponse,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "药房库存决策支持系统";

// ==========================================
// 预编译检查
// ==========================================
