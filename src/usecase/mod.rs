pub mod access_control;
pub mod auth_usecase;
pub mod camp_usecase;
pub mod contact_usecase;
pub mod payment_usecase;
pub mod registration_usecase;
pub mod review_usecase;
pub mod stats_usecase;
pub mod user_usecase;
