mod heroes;
mod init;
mod promote;
mod users;

pub use heroes::cmd_list_heroes;
pub use init::cmd_init;
pub use promote::cmd_promote;
pub use users::cmd_list_users;
