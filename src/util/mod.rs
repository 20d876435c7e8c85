//! Utility modules for procinspect.

mod users;

pub use users::{PASSWD_PATH, UserResolver, parse_passwd};
