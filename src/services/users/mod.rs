pub mod client;
pub mod passage;

pub use client::{NewUser, User, UserApi, UserApiError, UserOp, UserUpdate};
pub use passage::PassageUserClient;
