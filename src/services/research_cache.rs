use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::dal::research_cache_db;
use crate::domain::ResearchOutcome;

#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Fresh prior outcome for this company, None on miss/stale/error.
    async fn get(&self, company_name: &str) -> Option<ResearchOutcome>;

    async fn put(&self, company_name: &str, outcome: &ResearchOutcome);
}

/// Key is the md5 hex digest of the company name, exactly as written.
pub fn company_key(company_name: &str) -> String {
    format!("{:x}", md5::compute(company_name))
}

pub fn is_fresh(created_at: DateTime<Utc>, now: DateTime<Utc>, expiry_days: i64) -> bool {
    now - created_at < Duration::days(expiry_days)
}

pub struct PgResearchCache {
    pool: PgPool,
    expiry_days: i64,
}

impl PgResearchCache {
    pub fn new(pool: PgPool, expiry_days: i64) -> Self {
        PgResearchCache { pool, expiry_days }
    }
}

#[async_trait]
impl ResultCache for PgResearchCache {
    async fn get(&self, company_name: &str) -> Option<ResearchOutcome> {
        let key = company_key(company_name);

        let row = match research_cache_db::get_entry(&self.pool, &key).await {
            Ok(row) => row?,
            Err(e) => {
                log::error!("Cache lookup failed for {}: {:?}", company_name, e);
                return None;
            }
        };

        if !is_fresh(row.created_at, Utc::now(), self.expiry_days) {
            log::info!("Cache entry for {} is stale, re-researching", company_name);
            return None;
        }

        match (row.found, row.fact, row.source_url) {
            (true, Some(fact), Some(source_url)) if !fact.is_empty() => {
                Some(ResearchOutcome::resolved(fact, source_url))
            }
            (false, _, _) => Some(ResearchOutcome::unresolved()),
            _ => {
                log::error!("Corrupt cache entry for {}, ignoring", company_name);
                None
            }
        }
    }

    async fn put(&self, company_name: &str, outcome: &ResearchOutcome) {
        let key = company_key(company_name);

        if let Err(e) =
            research_cache_db::upsert_entry(&self.pool, &key, company_name, outcome).await
        {
            log::error!("Cache write failed for {}: {:?}", company_name, e);
        }
    }
}
