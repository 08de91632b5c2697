mod register;
mod users;

pub use register::cmd_register;
pub use users::cmd_list_users;
