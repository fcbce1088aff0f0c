// ==========================================
// 药房库存决策支持系统 - 控制台入口
// ==========================================
// 用途: 运维/联调时跑一遍建议管线, 输出 JSON;
//       看板渲染由外部协作方完成, 此处不做展示层
// ==========================================

use anyhow::Context;
use pharmacy_inventory_dss::api::{GetRecommendationsRequest, RecommendationApi};
use pharmacy_inventory_dss::{
    db, logging, ConfigManager, RecommendationApiImpl, RecommendationEngine,
};
use std::sync::{Arc, Mutex};

/// 默认数据库路径
const DEFAULT_DB_PATH: &str = "pharmacy_inventory.db";

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", pharmacy_inventory_dss::APP_NAME);
    tracing::info!("系统版本: {}", pharmacy_inventory_dss::VERSION);
    tracing::info!("==================================================");

    // 数据库路径: 第一个命令行参数, 缺省为当前目录
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
    tracing::info!("使用数据库: {}", db_path);

    let conn = db::open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    db::init_schema(&conn).context("初始化 schema 失败")?;

    let conn = Arc::new(Mutex::new(conn));

    // 加载策略（config_kv 覆写 + 默认值）
    let policy = ConfigManager::new(Arc::clone(&conn))
        .load_policy()
        .context("加载分析器策略失败")?;
    tracing::info!(?policy, "分析器策略已加载");

    // 跑一遍建议管线
    let engine = RecommendationEngine::new(conn, policy);
    let api = RecommendationApiImpl::new(Arc::new(engine));

    let response = api
        .get_recommendations(GetRecommendationsRequest::default())
        .map_err(anyhow::Error::msg)
        .context("生成建议列表失败")?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
