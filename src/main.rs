use actix_cors::Cors;
use actix_governor::Governor;
use actix_web::{middleware, web, App, HttpServer};
use aiwatch::classifier::ClassifierClient;
use aiwatch::config::Args;
use aiwatch::ingest::Ingestor;
use aiwatch::metadata::MetadataClient;
use aiwatch::{api, db, observability, DbPool};
use clap::Parser;
use dotenvy::dotenv;
use std::io;

fn main() -> io::Result<()> {
    dotenv().ok();
    observability::init_logging();

    let args = Args::parse();
    args.log_summary();

    let db_pool = db::initialize_db_pool(&args.database_url).map_err(io::Error::other)?;
    tracing::info!("Running database migrations");
    let mut conn = db_pool.get().map_err(io::Error::other)?;
    db::run_migrations(&mut conn).map_err(io::Error::other)?;
    drop(conn);

    let metadata = MetadataClient::new(args.youtube_api_url.clone(), args.metadata_timeout())
        .map_err(io::Error::other)?;
    let classifier = ClassifierClient::new(args.classifier_config()).map_err(io::Error::other)?;
    let ingestor = Ingestor::new(metadata, classifier).with_initial_videos(args.initial_videos);

    run_server(args, db_pool, ingestor)
}

#[actix_web::main]
async fn run_server(args: Args, db_pool: DbPool, ingestor: Ingestor) -> io::Result<()> {
    tracing::info!("Starting server at http://{}:{}", args.bind, args.port);

    let rate_limiter = api::routes::rate_limiter()
        .ok_or_else(|| io::Error::other("invalid rate limiter configuration"))?;

    let ingestor = web::Data::new(ingestor);
    let db_pool = web::Data::new(db_pool);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .wrap(cors)
            .app_data(db_pool.clone())
            .app_data(ingestor.clone())
            .service(api::health::routes())
            .service(api::routes().wrap(Governor::new(&rate_limiter)))
    })
    .bind((args.bind.as_str(), args.port))?
    .run()
    .await
}
