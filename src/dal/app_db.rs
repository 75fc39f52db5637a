use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct RunRow {
    pub id: Uuid,
    pub company_count: i32,
    pub created_at: DateTime<Utc>,
    pub personalized: i64,
    pub personalization_failed: i64,
    pub no_source_found: i64,
}

pub async fn get_run_table(pool: &PgPool) -> Result<Vec<RunRow>, sqlx::Error> {
    sqlx::query_as::<_, RunRow>(
        r"
        select
            r.id,
            r.company_count,
            r.created_at,
            count(o.id) filter (where o.status = 'PERSONALIZED') as personalized,
            count(o.id) filter (where o.status = 'PERSONALIZATION_FAILED') as personalization_failed,
            count(o.id) filter (where o.status = 'NO_SOURCE_FOUND') as no_source_found
        from
            outreach_run r
            left join output_record o on o.run_id = r.id
        group by r.id
        order by r.created_at desc
        limit 20
        ",
    )
    .fetch_all(pool)
    .await
}

#[derive(sqlx::FromRow)]
pub struct OutputRow {
    pub company_name: String,
    pub fact: String,
    pub source_url: String,
    pub personalized_message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub async fn get_outreach_table(pool: &PgPool) -> Result<Vec<OutputRow>, sqlx::Error> {
    sqlx::query_as::<_, OutputRow>(
        r"
        select
            company_name,
            fact,
            source_url,
            personalized_message,
            status::text as status,
            created_at
        from
            output_record
        order by created_at desc
        limit 50
        ",
    )
    .fetch_all(pool)
    .await
}
