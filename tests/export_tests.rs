use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{hl, hl_as, init_db, init_db_with_data, setup_test_db, temp_out};

#[test]
fn test_export_csv_has_flat_columns() {
    let db_path = setup_test_db("export_csv");
    init_db_with_data(&db_path);
    let out = temp_out("export_csv", "csv");

    hl_as(&db_path, &["export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();

    assert_eq!(
        lines.next(),
        Some("user_id,date,coffee,water_bottles_count,walk,pages_read,mood")
    );
    assert_eq!(lines.next(), Some("tester,2025-03-01,yes,5,,,good"));
    assert_eq!(lines.next(), Some("tester,2025-03-02,no,3,,,"));
    assert_eq!(lines.next(), Some("tester,2025-03-10,,,yes,20,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_export_csv_can_be_imported_back() {
    let db_path = setup_test_db("export_reimport_src");
    init_db_with_data(&db_path);
    let out = temp_out("export_reimport", "csv");

    hl_as(&db_path, &["export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success();

    let target = setup_test_db("export_reimport_dst");
    init_db(&target);

    hl().args(["--db", &target, "--user", "someone_else", "import", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Imported 3 rows (0 skipped)"));

    // the user_id column wins over --user
    hl_as(&target, &["list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("3 day(s) logged."));
}

#[test]
fn test_export_json_range_filter() {
    let db_path = setup_test_db("export_json_range");
    init_db_with_data(&db_path);
    let out = temp_out("export_json_range", "json");

    hl_as(
        &db_path,
        &["export", "--format", "json", "--file", &out, "--range", "2025-03-01:2025-03-05", "--force"],
    )
    .assert()
    .success();

    let logs: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let logs = logs.as_array().unwrap();

    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["user_id"], "tester");
    assert_eq!(logs[0]["date"], "2025-03-01");
    assert_eq!(logs[0]["fields"]["coffee"], true);
    assert_eq!(logs[0]["fields"]["mood"], "good");
    assert_eq!(logs[1]["date"], "2025-03-02");
}

#[test]
fn test_export_xlsx_creates_file() {
    let db_path = setup_test_db("export_xlsx");
    init_db_with_data(&db_path);
    let out = temp_out("export_xlsx", "xlsx");

    hl_as(&db_path, &["export", "--format", "xlsx", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let meta = fs::metadata(&out).expect("xlsx written");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    init_db_with_data(&db_path);
    let out = temp_out("export_empty", "csv");

    hl_as(&db_path, &["export", "--file", &out, "--range", "2019"])
        .assert()
        .success()
        .stdout(contains("No logs found for selected range."));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    hl_as(&db_path, &["export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_restore_from_json_export() {
    let db_path = setup_test_db("restore_src");
    init_db_with_data(&db_path);
    let out = temp_out("restore_src", "json");

    hl_as(&db_path, &["export", "--format", "json", "--file", &out, "--force"])
        .assert()
        .success();

    let target = setup_test_db("restore_dst");
    init_db(&target);

    hl_as(&target, &["restore", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Restored 3 records (0 skipped)"));

    hl_as(&target, &["list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-10"))
        .stdout(contains("3 day(s) logged."));

    let conn = rusqlite::Connection::open(&target).unwrap();
    let source: String = conn
        .query_row(
            "SELECT source FROM daily_logs WHERE log_date = '2025-03-01'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(source, "restore");
}

#[test]
fn test_restore_skips_invalid_records() {
    let db_path = setup_test_db("restore_invalid");
    init_db(&db_path);
    let file = common::temp_file(
        "restore_invalid",
        "json",
        r#"[
  {"user_id": "tester", "date": "2025-05-01", "fields": {"coffee": true, "pages_read": 12}},
  {"user_id": "tester", "date": "2025-05-02", "fields": {"water_bottles_count": -1}}
]"#,
    );

    hl_as(&db_path, &["restore", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Restored 1 records (1 skipped)"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup_db");
    init_db_with_data(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    hl_as(&db_path, &["backup", "--file", &plain, "--force"])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    // the copy is a working database
    let conn = rusqlite::Connection::open(&plain).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM daily_logs", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 3);

    let zipped = temp_out("backup_zip", "zip");
    hl_as(&db_path, &["backup", "--file", &zipped, "--compress", "--force"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(Path::new(&zipped).exists());
}

#[test]
fn test_restore_normalizes_field_keys() {
    let db_path = setup_test_db("restore_keys");
    init_db(&db_path);
    let file = common::temp_file(
        "restore_keys",
        "json",
        r##"[
  {"user_id": "tester", "date": "2025-06-01", "fields": {"Coffee": true, "# of Bottles of Water Drank?": 4}}
]"##,
    );

    hl_as(&db_path, &["restore", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Restored 1 records (0 skipped)"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let fields: String = conn
        .query_row(
            "SELECT fields FROM daily_logs WHERE log_date = '2025-06-01'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    let fields: serde_json::Value = serde_json::from_str(&fields).unwrap();
    assert_eq!(fields, serde_json::json!({"coffee": true, "water_bottles_count": 4}));
}

#[test]
fn test_restore_skips_text_in_count_field() {
    let db_path = setup_test_db("restore_text_count");
    init_db(&db_path);
    let file = common::temp_file(
        "restore_text_count",
        "json",
        r#"[
  {"user_id": "tester", "date": "2025-06-01", "fields": {"Water": "lots"}},
  {"user_id": "tester", "date": "2025-06-02", "fields": {"Water": 2}}
]"#,
    );

    hl_as(&db_path, &["restore", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Restored 1 records (1 skipped)"));
}
