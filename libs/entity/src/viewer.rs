use uuid::Uuid;

/// Identity a read or write is evaluated under.
///
/// Every authenticated caller acts as the owner of their own content; there
/// is no separate administrator capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Owner(Uuid),
}

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Owner(id) => Some(*id),
        }
    }
}

impl From<Option<Uuid>> for Viewer {
    fn from(value: Option<Uuid>) -> Self {
        match value {
            Some(id) => Viewer::Owner(id),
            None => Viewer::Anonymous,
        }
    }
}
