use actix_web::{App, HttpServer, middleware, web};
use jobkeeper::{JobRepository, ServerConfig, api};
use log::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    let store = config.open_store().await?;
    let repo = web::Data::new(JobRepository::new(store));

    info!("Listening on http://{}", config.bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .configure(api::configure_routes)
    })
    .bind(&config.bind_addr)?;

    if config.workers > 0 {
        server = server.workers(config.workers);
    }

    server.run().await?;
    Ok(())
}
