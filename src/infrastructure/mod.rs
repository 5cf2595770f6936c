pub mod camp_repository;
pub mod jwt_token_service;
pub mod payment_repository;
pub mod registration_repository;
pub mod review_repository;
pub mod stripe_gateway;
pub mod user_repository;
pub mod webhook_notifier;
