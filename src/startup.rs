use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use crate::{
    routes::{dashboard_route, default_route, outreach_route, run_route},
    services::RunRequestSender,
};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    run_request_sender: RunRequestSender,
) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);
    let run_request_sender = web::Data::new(run_request_sender);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::default)
            .service(web::scope("/run").service(run_route::enqueue_run))
            .service(
                web::scope("/app")
                    .service(dashboard_route::dashboard)
                    .service(outreach_route::outreach),
            )
            .app_data(db_pool.clone())
            .app_data(run_request_sender.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
