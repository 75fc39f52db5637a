use actix_web::{get, web, HttpResponse};
use askama::Template;
use sqlx::PgPool;

use crate::dal::app_db::{self, RunRow};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    runs: Vec<RunRow>,
}

#[get("/dashboard")]
async fn dashboard(pool: web::Data<PgPool>) -> HttpResponse {
    let runs = app_db::get_run_table(&pool).await.unwrap_or(vec![]);

    HttpResponse::Ok().body(DashboardTemplate { runs }.render().unwrap())
}
