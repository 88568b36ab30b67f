use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{hl, hl_as, init_db, init_db_with_data, json_from_stdout, setup_test_db, temp_out};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_schema");

    hl().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('log', 'daily_logs')",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(tables, 2);

    // source is part of the base schema, recorded once as schema version 0001
    let has_source: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('daily_logs') WHERE name = 'source'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(has_source, 1);

    // reopening must not record the version again
    hl_as(&db_path, &["list", "--period", "all"]).assert().success();

    let versions: Vec<String> = conn
        .prepare("SELECT target FROM log WHERE operation = 'migration_applied'")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(versions, vec!["0001_daily_logs_schema".to_string()]);
}

#[test]
fn test_add_then_list() {
    let db_path = setup_test_db("add_list");
    init_db(&db_path);

    hl_as(&db_path, &["add", "2025-03-01", "Coffee=yes", "water=5"])
        .assert()
        .success()
        .stdout(contains("Logged 2025-03-01 for tester"))
        .stdout(contains("coffee=yes, water_bottles_count=5"));

    hl_as(&db_path, &["list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-01"))
        .stdout(contains("Coffee"))
        .stdout(contains("Water bottles"))
        .stdout(contains("1 day(s) logged."));
}

#[test]
fn test_add_same_day_merges_fields() {
    let db_path = setup_test_db("add_merge");
    init_db(&db_path);

    hl_as(&db_path, &["add", "2025-03-01", "coffee=yes"])
        .assert()
        .success();

    hl_as(&db_path, &["add", "2025-03-01", "water=3", "mood=tired"])
        .assert()
        .success()
        .stdout(contains("Updated 2025-03-01"));

    let out = temp_out("add_merge", "json");
    hl_as(&db_path, &["export", "--format", "json", "--file", &out, "--force"])
        .assert()
        .success();

    let logs: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 1);

    let fields = &logs[0]["fields"];
    assert_eq!(fields["coffee"], true);
    assert_eq!(fields["water_bottles_count"], 3);
    assert_eq!(fields["mood"], "tired");
}

#[test]
fn test_add_empty_value_removes_field() {
    let db_path = setup_test_db("add_remove");
    init_db(&db_path);

    hl_as(&db_path, &["add", "2025-03-01", "coffee=yes", "water=2"])
        .assert()
        .success();
    hl_as(&db_path, &["add", "2025-03-01", "coffee="])
        .assert()
        .success()
        .stdout(contains("coffee removed"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let fields: String = conn
        .query_row(
            "SELECT fields FROM daily_logs WHERE user_id = 'tester' AND log_date = '2025-03-01'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    let fields: serde_json::Value = serde_json::from_str(&fields).unwrap();
    assert!(fields.get("coffee").is_none());
    assert_eq!(fields["water_bottles_count"], 2);
}

#[test]
fn test_one_row_per_user_and_day() {
    let db_path = setup_test_db("add_unique");
    init_db(&db_path);

    for v in ["1", "2", "3"] {
        hl_as(&db_path, &["add", "2025-03-05", &format!("pages={v}")])
            .assert()
            .success();
    }
    hl().args(["--db", &db_path, "--user", "other", "add", "2025-03-05", "pages=9"])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM daily_logs WHERE log_date = '2025-03-05'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(n, 2);

    hl_as(&db_path, &["list", "--period", "2025-03-05", "--all-users"])
        .assert()
        .success()
        .stdout(contains("tester"))
        .stdout(contains("other"))
        .stdout(contains("2 day(s) logged."));
}

#[test]
fn test_add_rejects_bad_input() {
    let db_path = setup_test_db("add_bad_input");
    init_db(&db_path);

    hl_as(&db_path, &["add", "2025-02-30", "coffee=yes"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    hl_as(&db_path, &["add", "2025-03-01", "coffee"])
        .assert()
        .failure()
        .stderr(contains("Invalid field assignment"));

    hl_as(&db_path, &["add", "2025-03-01", "water=-2"])
        .assert()
        .failure()
        .stderr(contains("count cannot be negative"));

    hl_as(&db_path, &["add", "2025-03-01", "water=lots"])
        .assert()
        .failure()
        .stderr(contains("count expects a number"));

    hl_as(&db_path, &["list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("No logs found."));
}

#[test]
fn test_remove_on_unlogged_day_creates_nothing() {
    let db_path = setup_test_db("add_remove_unlogged");
    init_db(&db_path);

    hl_as(&db_path, &["add", "2025-03-07", "coffee="])
        .assert()
        .failure()
        .stderr(contains("No log found for tester on 2025-03-07"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM daily_logs", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn test_list_period_filters() {
    let db_path = setup_test_db("list_period");
    init_db_with_data(&db_path);
    hl_as(&db_path, &["add", "2024-12-31", "coffee=yes"])
        .assert()
        .success();

    hl_as(&db_path, &["list", "--period", "2025-03-01:2025-03-02"])
        .assert()
        .success()
        .stdout(contains("2025-03-01").and(contains("2025-03-02")))
        .stdout(contains("2025-03-10").not())
        .stdout(contains("2 day(s) logged."));

    hl_as(&db_path, &["list", "--period", "2024"])
        .assert()
        .success()
        .stdout(contains("2024-12-31"))
        .stdout(contains("2025-03-01").not());

    hl_as(&db_path, &["list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("4 day(s) logged."));

    hl_as(&db_path, &["list", "--period", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn test_list_last_days() {
    let db_path = setup_test_db("list_last");
    init_db_with_data(&db_path);

    hl_as(&db_path, &["list", "--last", "2"])
        .assert()
        .success()
        .stdout(contains("2025-03-02").and(contains("2025-03-10")))
        .stdout(contains("2025-03-01").not())
        .stdout(contains("2 day(s) logged."));
}

#[test]
fn test_month_single_field_table() {
    let db_path = setup_test_db("month_field");
    init_db_with_data(&db_path);

    hl_as(&db_path, &["month", "2025-03", "--field", "water"])
        .assert()
        .success()
        .stdout(contains("March 2025"))
        .stdout(contains("Total:"))
        .stdout(contains("8"))
        .stdout(contains("2/31"));
}

#[test]
fn test_month_json_series() {
    let db_path = setup_test_db("month_json");
    init_db_with_data(&db_path);

    let out = hl_as(&db_path, &["month", "2025-03", "--field", "coffee", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = json_from_stdout(&out);
    let series = &json.as_array().unwrap()[0];
    let points = series["points"].as_array().unwrap();

    assert_eq!(series["field"], "coffee");
    assert_eq!(points.len(), 31);
    assert_eq!(points[0]["date"], "2025-03-01");
    assert_eq!(points[0]["recorded"], true);
    assert_eq!(points[1]["recorded"], true);
    assert_eq!(points[1]["value"].as_f64(), Some(0.0));
    assert_eq!(points[2]["recorded"], false);
    assert_eq!(series["total"].as_f64(), Some(1.0));
    assert_eq!(series["active_days"], 1);
}

#[test]
fn test_month_summary_and_empty_month() {
    let db_path = setup_test_db("month_summary");
    init_db_with_data(&db_path);

    hl_as(&db_path, &["month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("Coffee"))
        .stdout(contains("Water bottles"))
        .stdout(contains("Pages read"))
        .stdout(contains("best streak"));

    hl_as(&db_path, &["month", "2025-04"])
        .assert()
        .success()
        .stdout(contains("No numeric habits logged in this month."));

    hl_as(&db_path, &["month", "March"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn test_month_only_sees_current_user() {
    let db_path = setup_test_db("month_user");
    init_db_with_data(&db_path);

    let out = hl()
        .args(["--db", &db_path, "--user", "nobody", "month", "2025-03", "--field", "water", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = json_from_stdout(&out);
    assert_eq!(json[0]["total"].as_f64(), Some(0.0));
    assert_eq!(json[0]["active_days"], 0);
}

#[test]
fn test_del_removes_one_day() {
    let db_path = setup_test_db("del_day");
    init_db_with_data(&db_path);

    hl_as(&db_path, &["del", "2025-03-02", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    hl_as(&db_path, &["list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-02").not())
        .stdout(contains("2 day(s) logged."));

    hl_as(&db_path, &["del", "2025-03-02", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No log found for tester on 2025-03-02"));
}

#[test]
fn test_db_clear_current_user_only() {
    let db_path = setup_test_db("db_clear");
    init_db_with_data(&db_path);
    hl().args(["--db", &db_path, "--user", "other", "add", "2025-03-01", "coffee=yes"])
        .assert()
        .success();

    hl_as(&db_path, &["db", "--clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("Removed 3 daily logs of user 'tester'."));

    hl_as(&db_path, &["list", "--period", "all", "--all-users"])
        .assert()
        .success()
        .stdout(contains("other"))
        .stdout(contains("1 day(s) logged."));

    hl_as(&db_path, &["db", "--clear", "--all-users", "--yes"])
        .assert()
        .success()
        .stdout(contains("ALL users"));

    hl_as(&db_path, &["list", "--period", "all", "--all-users"])
        .assert()
        .success()
        .stdout(contains("No logs found."));
}

#[test]
fn test_db_check_and_vacuum() {
    let db_path = setup_test_db("db_check");
    init_db_with_data(&db_path);

    hl_as(&db_path, &["db", "--check", "--vacuum", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed."))
        .stdout(contains("Vacuum completed."))
        .stdout(contains("Migration completed."));
}

#[test]
fn test_internal_log_records_operations() {
    let db_path = setup_test_db("internal_log");
    init_db_with_data(&db_path);
    hl_as(&db_path, &["add", "2025-03-01", "walk=yes"])
        .assert()
        .success();

    hl_as(&db_path, &["log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("migration_applied"))
        .stdout(contains("init"))
        .stdout(contains("tester@2025-03-01"))
        .stdout(contains("edit"));

    hl_as(&db_path, &["log", "--last", "1"])
        .assert()
        .success()
        .stdout(contains("walk_minutes").not())
        .stdout(contains("walk=yes"))
        .stdout(contains("migration_applied").not());
}

#[test]
fn test_config_lists_habits() {
    hl().args(["config", "--habits"])
        .assert()
        .success()
        .stdout(contains("water_bottles_count"))
        .stdout(contains("# of Bottles of Water Drank?"));
}
