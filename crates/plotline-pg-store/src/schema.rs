//! Store database schema.
//!
//! The same SQL lives under `migrations/` for `sqlx::test`; production
//! startup applies it through [`ensure_schema`].

use sqlx::PgPool;

/// SQL to create the system-of-record table.
pub const CREATE_CONTENT_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS content_items (
    id           TEXT PRIMARY KEY,
    content_type VARCHAR(32) NOT NULL,
    project_id   UUID NOT NULL,
    source       VARCHAR(255) NOT NULL,
    user_id      UUID NOT NULL,
    created_at   TIMESTAMPTZ NOT NULL,
    payload      JSONB NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_content_items_user_id
    ON content_items (user_id, created_at);

CREATE INDEX IF NOT EXISTS idx_content_items_project_id
    ON content_items (project_id);
";

/// SQL to create the per-content-type query tables. One table per routed
/// destination; records are pre-transformed JSONB keyed by item id.
pub const CREATE_TYPED_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS "scenario-table" (
    item_id  TEXT PRIMARY KEY,
    user_id  UUID NOT NULL,
    record   JSONB NOT NULL,
    saved_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS "prompt-table" (
    item_id  TEXT PRIMARY KEY,
    user_id  UUID NOT NULL,
    record   JSONB NOT NULL,
    saved_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS "video-asset-table" (
    item_id  TEXT PRIMARY KEY,
    user_id  UUID NOT NULL,
    record   JSONB NOT NULL,
    saved_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS "story-table" (
    item_id  TEXT PRIMARY KEY,
    user_id  UUID NOT NULL,
    record   JSONB NOT NULL,
    saved_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS "idx_scenario_table_user_id" ON "scenario-table" (user_id);
CREATE INDEX IF NOT EXISTS "idx_prompt_table_user_id" ON "prompt-table" (user_id);
CREATE INDEX IF NOT EXISTS "idx_video_asset_table_user_id" ON "video-asset-table" (user_id);
CREATE INDEX IF NOT EXISTS "idx_story_table_user_id" ON "story-table" (user_id);
"#;

/// Apply the system-of-record schema. Safe to run repeatedly.
///
/// # Errors
///
/// Returns the underlying sqlx error if any statement fails.
pub async fn ensure_primary_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(CREATE_CONTENT_ITEMS_TABLE).execute(pool).await?;
    Ok(())
}

/// Apply the per-type query-table schema. Safe to run repeatedly.
///
/// # Errors
///
/// Returns the underlying sqlx error if any statement fails.
pub async fn ensure_secondary_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(CREATE_TYPED_TABLES).execute(pool).await?;
    Ok(())
}
