pub mod camp_repository;
pub mod payment_repository;
pub mod registration_repository;
pub mod review_repository;
pub mod user_repository;
