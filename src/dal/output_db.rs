use sqlx::{postgres::PgQueryResult, PgPool};
use uuid::Uuid;

use crate::domain::OutputRecord;

pub async fn insert_output_record(
    pool: &PgPool,
    run_id: Uuid,
    position: i32,
    record: &OutputRecord,
) -> Result<PgQueryResult, sqlx::Error> {
    sqlx::query(
        r"
        insert into output_record
            (run_id, position, linkedin_url, website_url, company_name,
             fact, source_url, message_template, personalized_message, status)
        values
            ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ",
    )
    .bind(run_id)
    .bind(position)
    .bind(&record.linkedin_url)
    .bind(&record.website_url)
    .bind(&record.company_name)
    .bind(&record.fact)
    .bind(&record.source_url)
    .bind(&record.message_template)
    .bind(&record.personalized_message)
    .bind(record.status)
    .execute(pool)
    .await
}
