// ==========================================
// 药房库存决策支持系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // ===== schema 口径错误 =====
    // 供应商质量数据缺列等情况归入此类, 信号层据此降级为空结果
    #[error("schema 口径不匹配: {0}")]
    SchemaMismatch(String),

    // ===== 数据质量错误 =====
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("no such column") || msg.contains("no such table") {
                    RepositoryError::SchemaMismatch(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::InvalidColumnName(name) => {
                RepositoryError::SchemaMismatch(format!("no such column: {}", name))
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl RepositoryError {
    /// 是否为 schema 口径问题（缺表/缺列）
    ///
    /// rusqlite 的 prepare 阶段错误会以 SqliteFailure 之外的形式出现,
    /// 这里统一按错误文本兜底判断。
    pub fn is_schema_mismatch(&self) -> bool {
        match self {
            RepositoryError::SchemaMismatch(_) => true,
            RepositoryError::DatabaseQueryError(msg) => {
                msg.contains("no such column") || msg.contains("no such table")
            }
            _ => false,
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
