//! SQLite persistence for transformed rows

use anyhow::{Context, Result, bail};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::{Row, SqlitePool};

use crate::types::{CellValue, ImportConfig, Record, RowOutcome};

/// Persist one transformed row, updating an existing row when configured
///
/// Blank rows (every value empty) are skipped. When `overwrite` is set, the
/// configured match field carries a non-empty value, and a stored row matches
/// it, that row is updated; otherwise a new row is inserted. Any store error
/// is returned for the caller to record as a per-row failure.
pub async fn upsert_row(
    pool: &SqlitePool,
    config: &ImportConfig,
    row: &Record,
) -> Result<RowOutcome> {
    if row.is_blank() {
        return Ok(RowOutcome::Skipped);
    }

    validate_identifier(&config.table)?;
    for (header, _) in row.iter() {
        validate_identifier(header)?;
    }

    if config.overwrite {
        if let Some(field) = config.match_field.as_deref() {
            validate_identifier(field)?;
            if let Some(key) = row.get(field).filter(|v| !v.is_empty()) {
                if row_exists(pool, &config.table, field, key).await? {
                    update_matching(pool, &config.table, field, key, row).await?;
                    return Ok(RowOutcome::Updated);
                }
            }
        }
    }

    insert_row(pool, &config.table, row).await?;
    Ok(RowOutcome::Created)
}

async fn row_exists(
    pool: &SqlitePool,
    table: &str,
    field: &str,
    key: &CellValue,
) -> Result<bool> {
    let sql = format!(
        "SELECT COUNT(*) AS n FROM {} WHERE {} = ?",
        quote_identifier(table),
        quote_identifier(field)
    );
    let row = bind_value(sqlx::query(&sql), key)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to look up existing row by {}", field))?;
    Ok(row.try_get::<i64, _>("n")? > 0)
}

async fn update_matching(
    pool: &SqlitePool,
    table: &str,
    field: &str,
    key: &CellValue,
    row: &Record,
) -> Result<()> {
    let assignments: Vec<String> = row
        .headers()
        .map(|h| format!("{} = ?", quote_identifier(h)))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quote_identifier(table),
        assignments.join(", "),
        quote_identifier(field)
    );

    let mut query = sqlx::query(&sql);
    for (_, value) in row.iter() {
        query = bind_value(query, value);
    }
    query = bind_value(query, key);

    query
        .execute(pool)
        .await
        .with_context(|| format!("Failed to update row matched on {}", field))?;
    Ok(())
}

async fn insert_row(pool: &SqlitePool, table: &str, row: &Record) -> Result<()> {
    let columns: Vec<String> = row.headers().map(quote_identifier).collect();
    let placeholders: Vec<&str> = row.headers().map(|_| "?").collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        columns.join(", "),
        placeholders.join(", ")
    );

    let mut query = sqlx::query(&sql);
    for (_, value) in row.iter() {
        query = bind_value(query, value);
    }

    query
        .execute(pool)
        .await
        .context("Failed to insert row")?;
    Ok(())
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q CellValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        CellValue::Null => query.bind(Option::<String>::None),
        CellValue::String(s) => query.bind(s.as_str()),
        CellValue::Int(i) => query.bind(*i),
        CellValue::Float(f) => query.bind(*f),
        CellValue::Bool(b) => query.bind(*b),
        CellValue::DateTime(dt) => query.bind(*dt),
    }
}

/// Reject table/column names that cannot be safely quoted into SQL
fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid {
        bail!("invalid SQL identifier: {:?}", name);
    }
    Ok(())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name)
}
