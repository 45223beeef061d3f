use crate::entities::{prelude::*, search_terms};
use crate::models::SearchRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub struct SearchLogRepository {
    conn: DatabaseConnection,
}

/// Fixed-width UTC form, so ordering by the stored string orders by time.
fn format_timestamp(when: DateTime<Utc>) -> String {
    when.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid stored timestamp: {raw}"))?
        .with_timezone(&Utc))
}

impl SearchLogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, term: &str, when: DateTime<Utc>) -> Result<()> {
        let active_model = search_terms::ActiveModel {
            term: Set(term.to_string()),
            searched_at: Set(format_timestamp(when)),
            ..Default::default()
        };

        SearchTerms::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }

    /// Newest first; equal timestamps fall back to insertion order.
    pub async fn recent(&self, limit: u64) -> Result<Vec<SearchRecord>> {
        let rows = SearchTerms::find()
            .order_by_desc(search_terms::Column::SearchedAt)
            .order_by_desc(search_terms::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(SearchRecord {
                    when: parse_timestamp(&row.searched_at)?,
                    term: row.term,
                })
            })
            .collect()
    }

    pub async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = SearchTerms::delete_many()
            .filter(search_terms::Column::SearchedAt.lt(format_timestamp(cutoff)))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }
}
