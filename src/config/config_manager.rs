// ==========================================
// 药房库存决策支持系统 - 配置管理器
// ==========================================
// 职责: 分析器策略常量的加载与覆写
// 存储: config_kv 表 (scope_id='global')
// ==========================================
// 说明: 压库倍数/滞销阈值等原本是硬编码的业务常量,
//       这里提升为可覆写配置, 默认值即原始口径, 不覆写时行为不变
// ==========================================

use crate::repository::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// 配置键全集
pub mod config_keys {
    /// 压库判定: current_stock > minimum_stock * 倍数
    pub const OVERSTOCK_STOCK_MULTIPLE: &str = "analyzer/overstock_stock_multiple";

    /// 压库判定: 按当前消耗速度的去化天数上限
    pub const OVERSTOCK_DEPLETION_DAYS: &str = "analyzer/overstock_depletion_days";

    /// 滞销判定: 消耗统计窗口（天）
    pub const SLOW_MOVER_WINDOW_DAYS: &str = "analyzer/slow_mover_window_days";

    /// 滞销判定: 窗口内总消耗下限（单位数）
    pub const SLOW_MOVER_THRESHOLD_UNITS: &str = "analyzer/slow_mover_threshold_units";
}

// ==========================================
// AnalyzerPolicy - 分析器策略常量
// ==========================================
// 默认值为行为口径的一部分, 必须与分析器阈值表保持一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerPolicy {
    /// 压库判定倍数（默认 3）
    pub overstock_stock_multiple: f64,

    /// 压库去化天数上限（默认 90）
    pub overstock_depletion_days: f64,

    /// 滞销统计窗口（默认 90 天）
    pub slow_mover_window_days: i64,

    /// 滞销总消耗下限（默认 10 单位）
    pub slow_mover_threshold_units: f64,
}

impl Default for AnalyzerPolicy {
    fn default() -> Self {
        Self {
            overstock_stock_multiple: 3.0,
            overstock_depletion_days: 90.0,
            slow_mover_window_days: 90,
            slow_mover_threshold_units: 10.0,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从共享连接创建 ConfigManager
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在（包括 config_kv 表本身不存在的旧库）
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(format!("锁获取失败: {}", e)))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => {
                let err: RepositoryError = e.into();
                if err.is_schema_mismatch() {
                    // 旧库没有 config_kv 表时按未配置处理
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// 读取数值配置, 解析失败时回落默认值并告警
    fn get_f64_or(&self, key: &str, default: f64) -> RepositoryResult<f64> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    tracing::warn!(key, value = %raw, "配置值无法解析为数值, 使用默认值");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    fn get_i64_or(&self, key: &str, default: i64) -> RepositoryResult<i64> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    tracing::warn!(key, value = %raw, "配置值无法解析为整数, 使用默认值");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    /// 加载分析器策略（默认值 + config_kv 覆写）
    pub fn load_policy(&self) -> RepositoryResult<AnalyzerPolicy> {
        let defaults = AnalyzerPolicy::default();

        Ok(AnalyzerPolicy {
            overstock_stock_multiple: self.get_f64_or(
                config_keys::OVERSTOCK_STOCK_MULTIPLE,
                defaults.overstock_stock_multiple,
            )?,
            overstock_depletion_days: self.get_f64_or(
                config_keys::OVERSTOCK_DEPLETION_DAYS,
                defaults.overstock_depletion_days,
            )?,
            slow_mover_window_days: self.get_i64_or(
                config_keys::SLOW_MOVER_WINDOW_DAYS,
                defaults.slow_mover_window_days,
            )?,
            slow_mover_threshold_units: self.get_f64_or(
                config_keys::SLOW_MOVER_THRESHOLD_UNITS,
                defaults.slow_mover_threshold_units,
            )?,
        })
    }
}
