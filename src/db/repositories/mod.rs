pub mod about;
pub mod daily_status;
pub mod links;
pub mod recipe;
pub mod user;
