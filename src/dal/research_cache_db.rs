use chrono::{DateTime, Utc};
use sqlx::{postgres::PgQueryResult, PgPool};

use crate::domain::ResearchOutcome;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct CacheRow {
    pub fact: Option<String>,
    pub source_url: Option<String>,
    pub found: bool,
    pub created_at: DateTime<Utc>,
}

pub async fn get_entry(pool: &PgPool, company_key: &str) -> Result<Option<CacheRow>, sqlx::Error> {
    sqlx::query_as::<_, CacheRow>(
        r"
        select
            fact, source_url, found, created_at
        from
            research_cache
        where
            company_key = $1
        ",
    )
    .bind(company_key)
    .fetch_optional(pool)
    .await
}

pub async fn upsert_entry(
    pool: &PgPool,
    company_key: &str,
    company_name: &str,
    outcome: &ResearchOutcome,
) -> Result<PgQueryResult, sqlx::Error> {
    sqlx::query(
        r"
        insert into research_cache
            (company_key, company_name, fact, source_url, found, created_at)
        values
            ($1, $2, $3, $4, $5, now())
        on conflict (company_key) do update set
            company_name = excluded.company_name,
            fact = excluded.fact,
            source_url = excluded.source_url,
            found = excluded.found,
            created_at = now()
        ",
    )
    .bind(company_key)
    .bind(company_name)
    .bind(&outcome.fact)
    .bind(&outcome.source_url)
    .bind(outcome.found)
    .execute(pool)
    .await
}
