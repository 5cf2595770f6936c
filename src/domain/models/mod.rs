pub mod camp;
pub mod identity;
pub mod payment;
pub mod registration;
pub mod review;
pub mod stats;
pub mod user;
