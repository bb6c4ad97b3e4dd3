use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Every unique constraint follows the `uq_` naming convention the API's
/// conflict classification relies on.
#[sqlx::test(migrations = "./migrations")]
async fn test_unique_constraints_named_uq(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, constraint_name
         FROM information_schema.table_constraints
         WHERE constraint_type = 'UNIQUE'
           AND table_schema = 'public'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, constraint) in &rows {
        assert!(
            constraint.starts_with("uq_"),
            "Unique constraint {constraint} on {table} should start with uq_"
        );
    }
}

/// No character varying columns should exist; TEXT is preferred.
#[sqlx::test(migrations = "./migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "varchar columns found (use TEXT): {rows:?}"
    );
}

/// Points balances can never go negative at the schema level.
#[sqlx::test(migrations = "./migrations")]
async fn test_points_check_constraint(pool: PgPool) {
    sqlx::query(
        "INSERT INTO users (username, display_name, email, password_hash) \
         VALUES ('checker', 'Checker', 'checker@test.com', 'x')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = sqlx::query("UPDATE users SET points = -1 WHERE username = 'checker'")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "negative points must violate the check");
}
