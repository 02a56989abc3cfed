pub use super::about_content::Entity as AboutContent;
pub use super::daily_status::Entity as DailyStatus;
pub use super::recipes::Entity as Recipes;
pub use super::resources::Entity as Resources;
pub use super::social_links::Entity as SocialLinks;
pub use super::users::Entity as Users;
