use actix_web::{get, middleware, web::Data, App, HttpRequest, HttpResponse, HttpServer, Responder};
use clap::Parser;
use operator::{
    config::Config,
    nginx_controller::{run, State},
    telemetry,
};
use std::future::Future;
use tracing::error;

#[get("/health")]
async fn health(_: HttpRequest) -> impl Responder {
    HttpResponse::Ok().json("healthy")
}

#[get("/")]
async fn index(c: Data<State>, _req: HttpRequest) -> impl Responder {
    let d = c.diagnostics().await;
    HttpResponse::Ok().json(&d)
}

/// Run the controller next to the web server. A failing controller ends the
/// process so the pod restarts instead of reporting healthy without one.
async fn supervise<C, S>(controller: C, server: S) -> anyhow::Result<()>
where
    C: Future<Output = operator::Result<()>>,
    S: Future<Output = std::io::Result<()>>,
{
    let controller = async {
        controller.await.map_err(|e| {
            error!("controller stopped: {e}");
            anyhow::Error::from(e)
        })
    };
    let server = async { server.await.map_err(anyhow::Error::from) };
    tokio::try_join!(controller, server)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    telemetry::init(config.log_format);

    // Initialize Kubernetes controller state
    let state = State::default();
    let controller = run(state.clone(), config.clone());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .wrap(middleware::Logger::default().exclude("/health"))
            .service(index)
            .service(health)
    })
    .bind(&config.bind_address)?
    .shutdown_timeout(5);

    // Both sides shut down on SIGINT/SIGTERM
    supervise(controller, server.run()).await
}
