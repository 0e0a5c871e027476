pub use super::category::Entity as Category;
pub use super::post::Entity as Post;
pub use super::user::Entity as User;
