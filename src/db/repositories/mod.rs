pub mod hero;
pub mod request;
pub mod review;
pub mod user;
