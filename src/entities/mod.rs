pub mod prelude;

pub mod about_content;
pub mod daily_status;
pub mod recipes;
pub mod resources;
pub mod social_links;
pub mod users;
