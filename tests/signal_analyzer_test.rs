// ==========================================
// 信号分析器集成测试
// ==========================================
// 测试目标: 验证七个分析器对真实库文件的窗口化聚合读
// 覆盖范围: 过滤谓词、排序、行数上限、无历史容错
// ==========================================


use pharmacy_inventory_dss::config::AnalyzerPolicy;
use pharmacy_inventory_dss::signal::{
    expiring, high_demand, low_stock, overstock, slow_mover, supplier,
};
use test_helpers::{
    days_ago, days_ahead, open_test_connection, seed_consumption, seed_supplier, snapshot_date,
    InventoryBuilder,
};

// ==========================================
// 低库存分析器
// ==========================================

#[test]
fn test_low_stock_cap_at_20_rows() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    // 25 个低库存条目, 缺口各不相同
    for i in 1..=25 {
        InventoryBuilder::new(i, &format!("Drug {:02}", i))
            .stock(0, 10 + i)
            .price(1.0)
            .insert(&conn);
    }

    let rows = low_stock::analyze(&conn, snapshot_date()).unwrap();

    assert_eq!(rows.len(), 20);
    // 缺口最大的在前
    assert_eq!(rows[0].shortage, 35);
    for pair in rows.windows(2) {
        assert!(pair[0].shortage >= pair[1].shortage);
    }
}

#[test]
fn test_low_stock_consumption_averaged_over_window() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    InventoryBuilder::new(1, "Amoxicillin 250mg")
        .category("Antibiotic")
        .stock(10, 50)
        .price(2.5)
        .insert(&conn);

    seed_consumption(&conn, 1, days_ago(5), 4.0);
    seed_consumption(&conn, 1, days_ago(10), 6.0);
    // 窗口外记录不参与均值
    seed_consumption(&conn, 1, days_ago(40), 100.0);

    let rows = low_stock::analyze(&conn, snapshot_date()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].avg_daily_consumption, 5.0);
    assert_eq!(rows[0].shortage, 40);
}

// ==========================================
// 临近效期分析器
// ==========================================

#[test]
fn test_expiring_window_and_order() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    InventoryBuilder::new(1, "Insulin Glargine")
        .stock(40, 10)
        .price(50.0)
        .expiry(days_ahead(10))
        .insert(&conn);
    InventoryBuilder::new(2, "Salbutamol Inhaler")
        .stock(20, 10)
        .price(8.0)
        .expiry(days_ahead(60))
        .insert(&conn);
    // 已过期 / 窗口外 / 零库存 均不入选
    InventoryBuilder::new(3, "Expired Syrup")
        .stock(5, 10)
        .price(3.0)
        .expiry(days_ago(2))
        .insert(&conn);
    InventoryBuilder::new(4, "Long Shelf Tablet")
        .stock(5, 10)
        .price(3.0)
        .expiry(days_ahead(200))
        .insert(&conn);
    InventoryBuilder::new(5, "Out Of Stock Vial")
        .stock(0, 10)
        .price(3.0)
        .expiry(days_ahead(10))
        .insert(&conn);

    let rows = expiring::analyze(&conn, snapshot_date()).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].drug_name, "Insulin Glargine");
    assert_eq!(rows[0].days_to_expiry, 10);
    assert_eq!(rows[0].potential_loss, 2000.0);
    assert_eq!(rows[1].days_to_expiry, 60);
}

// ==========================================
// 压库分析器
// ==========================================

#[test]
fn test_overstock_orders_by_tied_capital() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    InventoryBuilder::new(1, "Vitamin C 1000mg")
        .stock(500, 50)
        .price(2.0)
        .insert(&conn);
    InventoryBuilder::new(2, "Calcium Tablets")
        .stock(400, 50)
        .price(10.0)
        .insert(&conn);

    let rows = overstock::analyze(&conn, snapshot_date(), &AnalyzerPolicy::default()).unwrap();

    assert_eq!(rows.len(), 2);
    // 占压资金大的在前: 400*10 = 4000 > 500*2 = 1000
    assert_eq!(rows[0].drug_name, "Calcium Tablets");
    assert_eq!(rows[0].tied_capital, 4000.0);
}

#[test]
fn test_overstock_fast_moving_stock_excluded() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    InventoryBuilder::new(1, "Fast Mover")
        .stock(400, 50)
        .price(10.0)
        .insert(&conn);
    // 日均消耗 10 > 400/90, 去化足够快, 不算压库
    seed_consumption(&conn, 1, days_ago(3), 10.0);
    seed_consumption(&conn, 1, days_ago(6), 10.0);

    let rows = overstock::analyze(&conn, snapshot_date(), &AnalyzerPolicy::default()).unwrap();
    assert!(rows.is_empty());
}

// ==========================================
// 滞销分析器
// ==========================================

#[test]
fn test_slow_mover_missing_history_qualifies() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    InventoryBuilder::new(1, "Dusty Ointment")
        .stock(30, 10)
        .price(12.0)
        .insert(&conn);
    InventoryBuilder::new(2, "Popular Tablets")
        .stock(30, 10)
        .price(12.0)
        .insert(&conn);
    seed_consumption(&conn, 2, days_ago(10), 50.0);

    let rows = slow_mover::analyze(&conn, snapshot_date(), &AnalyzerPolicy::default()).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].drug_name, "Dusty Ointment");
    assert_eq!(rows[0].total_consumed, 0.0);
    assert_eq!(rows[0].inventory_value, 360.0);
}

#[test]
fn test_slow_mover_window_override() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    InventoryBuilder::new(1, "Borderline Item")
        .stock(30, 10)
        .price(12.0)
        .insert(&conn);
    // 第 45 天前消耗 20: 90 天窗口内不滞销, 30 天窗口内滞销
    seed_consumption(&conn, 1, days_ago(45), 20.0);

    let rows = slow_mover::analyze(&conn, snapshot_date(), &AnalyzerPolicy::default()).unwrap();
    assert!(rows.is_empty());

    let narrow = AnalyzerPolicy {
        slow_mover_window_days: 30,
        ..AnalyzerPolicy::default()
    };
    let rows = slow_mover::analyze(&conn, snapshot_date(), &narrow).unwrap();
    assert_eq!(rows.len(), 1);
}

// ==========================================
// 需求增长分析器
// ==========================================

#[test]
fn test_high_demand_requires_both_thresholds() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    // A: 40 -> 60, 增长显著且量足
    InventoryBuilder::new(1, "Oseltamivir 75mg")
        .stock(40, 20)
        .price(15.0)
        .insert(&conn);
    seed_consumption(&conn, 1, days_ago(10), 60.0);
    seed_consumption(&conn, 1, days_ago(40), 40.0);

    // B: 近 30 天只有 9 单位, 量不足
    InventoryBuilder::new(2, "Niche Cream")
        .stock(40, 20)
        .price(15.0)
        .insert(&conn);
    seed_consumption(&conn, 2, days_ago(10), 9.0);
    seed_consumption(&conn, 2, days_ago(40), 1.0);

    let rows = high_demand::analyze(&conn, snapshot_date()).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].drug_name, "Oseltamivir 75mg");
    assert_eq!(rows[0].last_30d, 60.0);
    assert_eq!(rows[0].prev_30d, 40.0);
}

// ==========================================
// 供应商绩效分析器
// ==========================================

#[test]
fn test_supplier_filter_and_order() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    seed_supplier(&conn, 1, "Good Supply Co", 4.5, 4.5, 5);
    seed_supplier(&conn, 2, "Slow Logistics", 4.0, 4.0, 15);
    seed_supplier(&conn, 3, "Shoddy Meds Ltd", 2.0, 2.5, 7);

    let rows = supplier::analyze(&conn).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Shoddy Meds Ltd");
    assert_eq!(rows[1].name, "Slow Logistics");
}

#[test]
fn test_supplier_schema_mismatch_degrades_to_empty() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();

    // 模拟旧库: suppliers 表缺 quality_score 列
    conn.execute_batch(
        r#"
        DROP TABLE suppliers;
        CREATE TABLE suppliers (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            reliability_score REAL NOT NULL,
            lead_time_days INTEGER NOT NULL
        );
        INSERT INTO suppliers VALUES (1, 'Legacy Vendor', 2.0, 20);
        "#,
    )
    .unwrap();

    let rows = supplier::analyze(&conn).unwrap();
    assert!(rows.is_empty());
}
