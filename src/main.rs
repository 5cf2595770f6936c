mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    infrastructure::{
        camp_repository::PostgresCampRepository, jwt_token_service::JwtTokenService,
        payment_repository::PostgresPaymentRepository,
        registration_repository::PostgresRegistrationRepository,
        review_repository::PostgresReviewRepository, stripe_gateway::StripePaymentGateway,
        user_repository::PostgresUserRepository, webhook_notifier::WebhookNotifier,
    },
    presentation::handlers::{
        auth_handler::create_auth_router, camp_handler::create_camp_router,
        contact_handler::create_contact_router, payment_handler::create_payment_router,
        registration_handler::create_registration_router, review_handler::create_review_router,
        stats_handler::create_stats_router, user_handler::create_user_router,
    },
    usecase::{
        access_control::AccessControl, auth_usecase::AuthUsecase, camp_usecase::CampUsecase,
        contact_usecase::ContactUsecase, payment_usecase::PaymentUsecase,
        registration_usecase::RegistrationUsecase, review_usecase::ReviewUsecase,
        stats_usecase::StatsUsecase, user_usecase::UserUsecase,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let config = Config::from_env()?;

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);
    let db = Database::connect(opt).await?;
    db.ping().await?;

    let user_repository = PostgresUserRepository::new(db.clone());
    let camp_repository = PostgresCampRepository::new(db.clone());
    let registration_repository = PostgresRegistrationRepository::new(db.clone());
    let payment_repository = PostgresPaymentRepository::new(db.clone());
    let review_repository = PostgresReviewRepository::new(db.clone());

    let token_service = JwtTokenService::new(config.access_token_secret.clone());
    let access = AccessControl::new(user_repository.clone());

    let auth = Arc::new(AuthUsecase::new(
        token_service.clone(),
        token_service.clone(),
    ));
    let users = Arc::new(UserUsecase::new(user_repository.clone(), access.clone()));
    let camps = Arc::new(CampUsecase::new(camp_repository.clone(), access.clone()));
    let registrations = Arc::new(RegistrationUsecase::new(
        registration_repository.clone(),
        camp_repository.clone(),
        payment_repository.clone(),
        access.clone(),
        config.decrement_on_cancel,
    ));
    let payments = Arc::new(PaymentUsecase::new(
        payment_repository.clone(),
        registration_repository.clone(),
        camp_repository.clone(),
        StripePaymentGateway::new(config.stripe_secret_key.clone()),
        access.clone(),
    ));
    let stats = Arc::new(StatsUsecase::new(
        registration_repository.clone(),
        payment_repository.clone(),
        camp_repository.clone(),
        user_repository.clone(),
        access.clone(),
    ));
    let reviews = Arc::new(ReviewUsecase::new(review_repository, access.clone()));
    let contact = Arc::new(ContactUsecase::new(WebhookNotifier::new(
        config.contact_webhook_url.clone(),
    )));

    let api = create_auth_router(auth.clone())
        .merge(create_user_router(users, auth.clone()))
        .merge(create_camp_router(camps, auth.clone()))
        .merge(create_registration_router(registrations, auth.clone()))
        .merge(create_payment_router(payments, auth.clone()))
        .merge(create_stats_router(stats, auth.clone()))
        .merge(create_review_router(reviews, auth.clone()))
        .merge(create_contact_router(contact));

    let app = Router::new()
        .route("/", get(|| async { "camp registration api" }))
        .nest("/api", api);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
