use actix_web::{get, web, HttpResponse};
use askama::Template;
use sqlx::PgPool;

use crate::dal::app_db::{self, OutputRow};

#[derive(Template)]
#[template(path = "outreach.html")]
struct OutreachTemplate {
    records: Vec<OutputRow>,
}

#[get("/outreach")]
async fn outreach(pool: web::Data<PgPool>) -> HttpResponse {
    let records = app_db::get_outreach_table(&pool).await.unwrap_or(vec![]);

    HttpResponse::Ok().body(OutreachTemplate { records }.render().unwrap())
}
