// ==========================================
// 药房库存决策支持系统 - 仓储层
// ==========================================
// 职责: 数据访问的错误口径与公共约定
// 说明: 七个信号分析器的窗口化聚合读在 signal 模块内各自拼装,
//       统一经由本层的错误类型返回
// ==========================================

pub mod error;

pub use error::{RepositoryError, RepositoryResult};
