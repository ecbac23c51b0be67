// Integration tests for the migration runner

use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();

    let result = coursereg_store::migrations::apply_migrations(&mut conn);
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    let tables = get_table_names(&conn);
    let expected_tables = vec![
        "course",
        "schema_version",
        "sqlite_sequence", // Auto-created by SQLite for AUTOINCREMENT columns
        "student",
        "student_course",
    ];
    assert_eq!(tables, expected_tables);
}

#[test]
fn test_migration_recorded_with_checksum() {
    let mut conn = setup_test_db();
    coursereg_store::migrations::apply_migrations(&mut conn).unwrap();

    let (count, checksum): (i64, String) = conn
        .query_row(
            "SELECT COUNT(*), MAX(checksum) FROM schema_version",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();

    assert_eq!(count, coursereg_store::migrations::get_migrations().len() as i64);
    assert_eq!(checksum.len(), 64);
}

#[test]
fn test_migration_idempotency() {
    let mut conn = setup_test_db();
    coursereg_store::migrations::apply_migrations(&mut conn).unwrap();
    coursereg_store::migrations::apply_migrations(&mut conn).unwrap();

    let version_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version_count, 1, "Re-applying must not duplicate entries");
}

#[test]
fn test_tampered_checksum_is_rejected() {
    let mut conn = setup_test_db();
    coursereg_store::migrations::apply_migrations(&mut conn).unwrap();

    conn.execute(
        "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_initial_schema'",
        [],
    )
    .unwrap();

    let err = coursereg_store::migrations::apply_migrations(&mut conn).unwrap_err();
    assert_eq!(err.kind(), coursereg_core::ExErrorKind::Persistence);
    assert!(err.message().contains("Checksum mismatch"));
}

#[test]
fn test_join_relation_rejects_duplicate_pairs() {
    let mut conn = setup_test_db();
    coursereg_store::migrations::apply_migrations(&mut conn).unwrap();

    conn.execute_batch(
        "INSERT INTO student (email, name, password) VALUES ('a@x.com', 'A', 'pw');
         INSERT INTO course (name, instructor) VALUES ('Algo', 'Dr. X');
         INSERT INTO student_course (student_email, course_id) VALUES ('a@x.com', 1);",
    )
    .unwrap();

    let dup = conn.execute(
        "INSERT INTO student_course (student_email, course_id) VALUES ('a@x.com', 1)",
        [],
    );
    assert!(dup.is_err(), "UNIQUE(student_email, course_id) must hold");
}
