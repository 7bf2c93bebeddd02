//! Coin record queries

use chrono::{DateTime, Utc};
use numis_core::{
    error::Result,
    types::{Coin, CoinDetails, CoinFilter, CoinId, CoinPayload, CoinUpdate, Orientation},
    NumisError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, prices, description, country, stock, active, images,
           issuer, authority, year, coin_type,
           face_value, monetary_unit,
           composition, weight, diameter, thickness, shape, technique, orientation,
           demonetized, catalog_number, catalog_references,
           created_at
    FROM coins
"#;

/// Get all coins matching `filter`, newest first
pub async fn get_all(pool: &SqlitePool, filter: CoinFilter) -> Result<Vec<Coin>> {
    let rows = match filter.active {
        Some(active) => {
            sqlx::query(&format!(
                "{SELECT_COLUMNS} WHERE active = ? ORDER BY created_at DESC, rowid DESC"
            ))
            .bind(active)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(row_to_coin).collect()
}

/// Get coin by ID
pub async fn get_by_id(pool: &SqlitePool, id: &CoinId) -> Result<Option<Coin>> {
    let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(row_to_coin).transpose()
}

/// Create new coin
pub async fn create(pool: &SqlitePool, payload: CoinPayload) -> Result<Coin> {
    let id = CoinId::generate();
    let now = Utc::now();
    let prices = to_json(&payload.prices)?;
    let images = to_json(&payload.images)?;
    let details = &payload.details;

    sqlx::query(
        r#"
        INSERT INTO coins (
            id, name, prices, description, country, stock, active, images,
            issuer, authority, year, coin_type,
            face_value, monetary_unit,
            composition, weight, diameter, thickness, shape, technique, orientation,
            demonetized, catalog_number, catalog_references,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&payload.name)
    .bind(&prices)
    .bind(&payload.description)
    .bind(&payload.country)
    .bind(i64::from(payload.stock))
    .bind(payload.active)
    .bind(&images)
    .bind(&details.issuer)
    .bind(&details.authority)
    .bind(&details.year)
    .bind(&details.coin_type)
    .bind(&details.face_value)
    .bind(&details.monetary_unit)
    .bind(&details.composition)
    .bind(details.weight)
    .bind(details.diameter)
    .bind(details.thickness)
    .bind(&details.shape)
    .bind(&details.technique)
    .bind(details.orientation.map(|o| o.as_str()))
    .bind(details.demonetized)
    .bind(&details.catalog_number)
    .bind(&details.references)
    .bind(now.timestamp_millis())
    .bind(now.timestamp_millis())
    .execute(pool)
    .await?;

    tracing::debug!(coin_id = %id, name = %payload.name, "Coin created");

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| NumisError::storage("Failed to retrieve created coin"))
}

/// Apply an update to an existing coin
pub async fn update(pool: &SqlitePool, id: &CoinId, update: CoinUpdate) -> Result<Coin> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| NumisError::CoinNotFound(id.clone()))?;

    let mut coin = row_to_coin(&row)?;
    coin.apply(update);

    let prices = to_json(&coin.prices)?;
    let images = to_json(&coin.images)?;
    let details = &coin.details;

    sqlx::query(
        r#"
        UPDATE coins SET
            name = ?, prices = ?, description = ?, country = ?, stock = ?, active = ?,
            images = ?, issuer = ?, authority = ?, year = ?, coin_type = ?,
            face_value = ?, monetary_unit = ?, composition = ?, weight = ?, diameter = ?,
            thickness = ?, shape = ?, technique = ?, orientation = ?, demonetized = ?,
            catalog_number = ?, catalog_references = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&coin.name)
    .bind(&prices)
    .bind(&coin.description)
    .bind(&coin.country)
    .bind(i64::from(coin.stock))
    .bind(coin.active)
    .bind(&images)
    .bind(&details.issuer)
    .bind(&details.authority)
    .bind(&details.year)
    .bind(&details.coin_type)
    .bind(&details.face_value)
    .bind(&details.monetary_unit)
    .bind(&details.composition)
    .bind(details.weight)
    .bind(details.diameter)
    .bind(details.thickness)
    .bind(&details.shape)
    .bind(&details.technique)
    .bind(details.orientation.map(|o| o.as_str()))
    .bind(details.demonetized)
    .bind(&details.catalog_number)
    .bind(&details.references)
    .bind(Utc::now().timestamp_millis())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(coin)
}

/// Delete coin
pub async fn delete(pool: &SqlitePool, id: &CoinId) -> Result<()> {
    let result = sqlx::query("DELETE FROM coins WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(NumisError::CoinNotFound(id.clone()));
    }

    Ok(())
}

fn row_to_coin(row: &SqliteRow) -> Result<Coin> {
    let prices: String = row.get("prices");
    let images: String = row.get("images");
    let orientation = row
        .get::<Option<String>, _>("orientation")
        .map(|s| s.parse::<Orientation>())
        .transpose()?;
    let created_at = DateTime::from_timestamp_millis(row.get::<i64, _>("created_at"))
        .ok_or_else(|| NumisError::storage("Invalid timestamp"))?;

    Ok(Coin {
        id: row.get("id"),
        name: row.get("name"),
        prices: serde_json::from_str(&prices)?,
        description: row.get("description"),
        country: row.get("country"),
        stock: u32::try_from(row.get::<i64, _>("stock")).unwrap_or(0),
        active: row.get::<i64, _>("active") != 0,
        images: serde_json::from_str(&images)?,
        details: CoinDetails {
            issuer: row.get("issuer"),
            authority: row.get("authority"),
            year: row.get("year"),
            coin_type: row.get("coin_type"),
            face_value: row.get("face_value"),
            monetary_unit: row.get("monetary_unit"),
            composition: row.get("composition"),
            weight: row.get("weight"),
            diameter: row.get("diameter"),
            thickness: row.get("thickness"),
            shape: row.get("shape"),
            technique: row.get("technique"),
            orientation,
            demonetized: row.get::<i64, _>("demonetized") != 0,
            catalog_number: row.get("catalog_number"),
            references: row.get("catalog_references"),
        },
        created_at,
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(NumisError::from)
}
