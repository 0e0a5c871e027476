use std::fmt;

use uuid::Uuid;

#[derive(Default, PartialEq, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: Vec<u8>,
}

// keeps the hash out of logs
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
