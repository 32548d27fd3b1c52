use serde::{Deserialize, Deserializer};

/// Store-assigned identifier (SQLite rowid).
pub type ItemId = i64;

pub const DEFAULT_VOLUME: &str = "Unknown";
pub const DEFAULT_TITLE: &str = "No title";
pub const DEFAULT_YEAR: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "None";
pub const DEFAULT_IMAGE: &str = "img/placeholder.png";

// ============================================================================
// Input Fields
// ============================================================================

/// Field mapping as it appears in initial data. Every attribute is optional.
///
/// `volume` and `year` accept either JSON strings or numbers since hand-written
/// seed files mix the two.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemFields {
    #[serde(deserialize_with = "text_or_number")]
    pub volume: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub year: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub collected: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Integer(n) => n.to_string(),
        TextOrNumber::Float(f) => f.to_string(),
    }))
}

// ============================================================================
// Entities
// ============================================================================

/// An item that has not been persisted yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub volume: String,
    pub title: String,
    pub year: String,
    pub description: String,
    pub image: String,
    pub collected: bool,
}

impl NewItem {
    /// Build an item from raw fields, filling every missing attribute with its default.
    ///
    /// Only absent attributes are defaulted; an explicit empty string is kept.
    pub fn create(fields: ItemFields) -> Self {
        Self {
            volume: fields.volume.unwrap_or_else(|| DEFAULT_VOLUME.to_string()),
            title: fields.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            year: fields.year.unwrap_or_else(|| DEFAULT_YEAR.to_string()),
            description: fields
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            image: fields.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            collected: fields.collected.unwrap_or(false),
        }
    }

    /// Attach the id assigned by the store on first persist.
    pub fn persisted(self, id: ItemId) -> Item {
        Item {
            id,
            volume: self.volume,
            title: self.title,
            year: self.year,
            description: self.description,
            image: self.image,
            collected: self.collected,
        }
    }
}

/// A catalog entry with a persisted representation.
///
/// `collected` is the only field the user can change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub volume: String,
    pub title: String,
    pub year: String,
    pub description: String,
    pub image: String,
    pub collected: bool,
}

impl Item {
    /// Flip the collected flag, returning the new value.
    ///
    /// Persisting the flip is the caller's job; see `App::toggle_item`.
    pub fn toggle(&mut self) -> bool {
        self.collected = !self.collected;
        self.collected
    }

    /// Compare against a volume token taken from a location fragment.
    ///
    /// Numeric volumes compare by value so `albums/02` and `albums/2` resolve
    /// to the same album.
    pub fn matches_volume(&self, token: &str) -> bool {
        let token = token.trim();
        if self.volume == token {
            return true;
        }
        match (self.volume.parse::<i64>(), token.parse::<i64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
