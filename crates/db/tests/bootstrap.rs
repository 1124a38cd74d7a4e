use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    shortscout_db::health_check(&pool).await.unwrap();

    let tables = [
        "titles",
        "safety_reports",
        "excluded_channels",
        "analysis_snapshots",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The one-tier-per-channel invariant is enforced by the schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_channel_id_rejected(pool: PgPool) {
    sqlx::query(
        "INSERT INTO excluded_channels (channel_id, channel_name, risk_level)
         VALUES ('UC_x', 'X', 'forbidden')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let duplicate = sqlx::query(
        "INSERT INTO excluded_channels (channel_id, channel_name, risk_level)
         VALUES ('UC_x', 'X again', 'warning')",
    )
    .execute(&pool)
    .await;
    assert!(duplicate.is_err());
}
