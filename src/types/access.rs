//! Access level enumeration, ordered private < fileprivate < internal < public < open.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    Private,
    FilePrivate,
    Internal,
    Public,
    Open,
}

impl Default for AccessLevel {
    fn default() -> Self {
        AccessLevel::Internal
    }
}

impl AccessLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AccessLevel::Private => "private",
            AccessLevel::FilePrivate => "fileprivate",
            AccessLevel::Internal => "internal",
            AccessLevel::Public => "public",
            AccessLevel::Open => "open",
        }
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_spec() {
        assert!(AccessLevel::Private < AccessLevel::FilePrivate);
        assert!(AccessLevel::FilePrivate < AccessLevel::Internal);
        assert!(AccessLevel::Internal < AccessLevel::Public);
        assert!(AccessLevel::Public < AccessLevel::Open);
    }

    #[test]
    fn default_is_internal() {
        assert_eq!(AccessLevel::default(), AccessLevel::Internal);
    }
}
