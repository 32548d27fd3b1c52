use std::fmt;

/// Which partition of the catalog is currently shown.
///
/// Tokens other than `collected` and `remaining` are kept verbatim so the
/// location bar can echo them back; they hide nothing and match no nav entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Collected,
    Remaining,
    Other(String),
}

impl Filter {
    /// Parse a route token. Surrounding whitespace is ignored.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "" => Self::All,
            "collected" => Self::Collected,
            "remaining" => Self::Remaining,
            other => Self::Other(other.to_string()),
        }
    }

    /// The fragment that selects this filter.
    pub fn token(&self) -> &str {
        match self {
            Self::All => "",
            Self::Collected => "collected",
            Self::Remaining => "remaining",
            Self::Other(token) => token,
        }
    }

    /// Whether an item with the given collected flag is hidden under this filter.
    pub fn hides(&self, collected: bool) -> bool {
        matches!(
            (self, collected),
            (Self::Collected, false) | (Self::Remaining, true)
        )
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Collected => f.write_str("Collected"),
            Self::Remaining => f.write_str("Remaining"),
            Self::Other(token) => write!(f, "'{}'", token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_trims() {
        assert_eq!(Filter::from_token(""), Filter::All);
        assert_eq!(Filter::from_token("   "), Filter::All);
        assert_eq!(Filter::from_token(" collected "), Filter::Collected);
        assert_eq!(Filter::from_token("remaining"), Filter::Remaining);
        assert_eq!(
            Filter::from_token(" wishlist"),
            Filter::Other("wishlist".to_string())
        );
    }

    #[test]
    fn test_hidden_cases() {
        assert!(Filter::Collected.hides(false));
        assert!(Filter::Remaining.hides(true));

        assert!(!Filter::Collected.hides(true));
        assert!(!Filter::Remaining.hides(false));
        assert!(!Filter::All.hides(true));
        assert!(!Filter::All.hides(false));
    }

    #[test]
    fn test_unknown_token_hides_nothing() {
        let filter = Filter::from_token("wishlist");
        assert!(!filter.hides(true));
        assert!(!filter.hides(false));
        assert_eq!(filter.token(), "wishlist");
    }
}
