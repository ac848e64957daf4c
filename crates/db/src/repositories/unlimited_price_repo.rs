//! Repository for the `corporate_unlimited_prices` table.

use coachhub_core::corporate::UnlimitedPriceInput;
use coachhub_core::types::DbId;
use sqlx::{MySqlConnection, MySqlPool};

use crate::models::corporate_settings::UnlimitedPrice;

const COLUMNS: &str = "id, corporate_id, month, price, created_at, updated_at";

pub struct UnlimitedPriceRepo;

impl UnlimitedPriceRepo {
    /// Insert price tiers for a corporate.
    pub async fn create_many(
        conn: &mut MySqlConnection,
        corporate_id: DbId,
        prices: &[UnlimitedPriceInput],
    ) -> Result<(), sqlx::Error> {
        for tier in prices {
            sqlx::query(
                "INSERT INTO corporate_unlimited_prices (corporate_id, month, price) VALUES (?, ?, ?)",
            )
            .bind(corporate_id)
            .bind(tier.month)
            .bind(tier.price)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Drop all tiers of a corporate and insert `prices` in their place.
    pub async fn replace(
        conn: &mut MySqlConnection,
        corporate_id: DbId,
        prices: &[UnlimitedPriceInput],
    ) -> Result<(), sqlx::Error> {
        Self::delete_by_corporate(&mut *conn, corporate_id).await?;
        Self::create_many(conn, corporate_id, prices).await
    }

    pub async fn delete_by_corporate(
        conn: &mut MySqlConnection,
        corporate_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM corporate_unlimited_prices WHERE corporate_id = ?")
            .bind(corporate_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_by_corporate(
        pool: &MySqlPool,
        corporate_id: DbId,
    ) -> Result<Vec<UnlimitedPrice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM corporate_unlimited_prices WHERE corporate_id = ? ORDER BY month"
        );
        sqlx::query_as::<_, UnlimitedPrice>(&query)
            .bind(corporate_id)
            .fetch_all(pool)
            .await
    }
}
