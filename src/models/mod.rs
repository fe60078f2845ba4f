pub mod request;
pub mod review;
pub mod timestamp;
