pub mod camps;
pub mod payments;
pub mod registrations;
pub mod reviews;
pub mod users;
