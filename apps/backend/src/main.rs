use actix_web::{web, App, HttpServer};
use backend::config::db::{redis_url, DbOwner, DbProfile};
use backend::infra::db::connect_db;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend::state::app_state::AppState;
use backend::ws::hub::RealtimeBroker;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    backend::telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let db = match connect_db(DbProfile::Prod, DbOwner::App).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, migration::MigrationCommand::Up).await {
        eprintln!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let broker = match RealtimeBroker::connect(&redis_url()).await {
        Ok(broker) => broker,
        Err(e) => {
            eprintln!("Failed to connect to Redis: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(db, broker);

    tracing::info!(host = %host, port, "Starting tournament backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
