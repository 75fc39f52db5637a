use sqlx::{postgres::PgQueryResult, PgPool};
use uuid::Uuid;

pub async fn insert_run(
    pool: &PgPool,
    run_id: Uuid,
    message_template: &str,
    master_prompt: &str,
    company_count: i32,
) -> Result<PgQueryResult, sqlx::Error> {
    sqlx::query(
        r"
        insert into outreach_run
            (id, message_template, master_prompt, company_count)
        values
            ($1, $2, $3, $4)
        ",
    )
    .bind(run_id)
    .bind(message_template)
    .bind(master_prompt)
    .bind(company_count)
    .execute(pool)
    .await
}
