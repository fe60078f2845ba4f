pub use super::heroes::Entity as Heroes;
pub use super::request_responses::Entity as RequestResponses;
pub use super::requests::Entity as Requests;
pub use super::reviews::Entity as Reviews;
pub use super::users::Entity as Users;
