use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dal::run_db,
    domain::{Company, Strategy},
    services::{RunRequest, RunRequestSender},
};

#[derive(Deserialize)]
struct EnqueueRunBody {
    companies: Vec<Company>,
    strategies: Vec<Strategy>,
    message_template: String,
    master_prompt: String,
}

#[post("")]
async fn enqueue_run(
    body: web::Json<EnqueueRunBody>,
    pool: web::Data<PgPool>,
    run_request_sender: web::Data<RunRequestSender>,
) -> HttpResponse {
    let body = body.into_inner();
    let run_id = Uuid::new_v4();

    if let Err(e) = run_db::insert_run(
        &pool,
        run_id,
        &body.message_template,
        &body.master_prompt,
        body.companies.len() as i32,
    )
    .await
    {
        log::error!("Error inserting run: {:?}", e);
        return HttpResponse::InternalServerError().body("Could not record the run");
    }

    let request = RunRequest {
        run_id,
        companies: body.companies,
        strategies: body.strategies,
        message_template: body.message_template,
        master_prompt: body.master_prompt,
    };

    match run_request_sender.sender.send(request) {
        Ok(_) => HttpResponse::Ok().body(run_id.to_string()),
        Err(e) => {
            log::error!("Found error while sending: {:?}", e);
            HttpResponse::InternalServerError().body("Run handler is not running")
        }
    }
}
