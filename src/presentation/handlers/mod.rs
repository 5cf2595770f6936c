pub mod auth_handler;
pub mod camp_handler;
pub mod contact_handler;
pub mod payment_handler;
pub mod registration_handler;
pub mod review_handler;
pub mod stats_handler;
pub mod user_handler;
