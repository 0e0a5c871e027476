//! Caller-supplied update payloads. A field left as `None` was not sent.

/// Publish flag as it arrives from a caller: sent as true, sent as false,
/// or not sent at all. `Absent` is rejected wherever the flag is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishFlag {
    #[default]
    Absent,
    Draft,
    Published,
}

impl PublishFlag {
    pub fn value(self) -> Option<bool> {
        match self {
            PublishFlag::Absent => None,
            PublishFlag::Draft => Some(false),
            PublishFlag::Published => Some(true),
        }
    }
}

impl From<Option<bool>> for PublishFlag {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => PublishFlag::Published,
            Some(false) => PublishFlag::Draft,
            None => PublishFlag::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum UpdateMode {
    /// The payload determines every caller-owned field; unsent fields reset.
    Replace,
    /// Only sent fields overwrite the existing record.
    Merge,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PostPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_publish: PublishFlag,
    pub category_name: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CategoryPayload {
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserPayload {
    pub username: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_publish_flag_keeps_three_states() {
        assert_eq!(PublishFlag::from(None), PublishFlag::Absent);
        assert_eq!(PublishFlag::from(Some(false)).value(), Some(false));
        assert_eq!(PublishFlag::from(Some(true)).value(), Some(true));
        assert_eq!(PublishFlag::Absent.value(), None);
    }
}
