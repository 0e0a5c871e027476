pub mod category;
pub mod payload;
pub mod post;
pub mod user;
pub mod viewer;

pub mod prelude {
    pub use crate::category::Category as CategoryEntity;
    pub use crate::payload::{
        CategoryPayload, PostPayload, PublishFlag, UpdateMode, UserPayload,
    };
    pub use crate::post::{Post as PostEntity, PostState};
    pub use crate::user::User as UserEntity;
    pub use crate::viewer::Viewer;
}
