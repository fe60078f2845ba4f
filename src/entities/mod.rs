pub mod prelude;

pub mod heroes;
pub mod request_responses;
pub mod requests;
pub mod reviews;
pub mod users;
