//! Item module - a unit of ingested content

use crate::ids::{ItemId, SourceId};

/// The kind of content an item carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// Long-form news article
    Article,
    /// Social media post
    Post,
    /// Chat/forum message
    Message,
}

impl ItemType {
    /// Get the item type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Article => "article",
            ItemType::Post => "post",
            ItemType::Message => "message",
        }
    }

    /// Parse an item type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "article" => Some(ItemType::Article),
            "post" => Some(ItemType::Post),
            "message" => Some(ItemType::Message),
            _ => None,
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid item type: {}", s))
    }
}

/// A unit of ingested content (article, post, message)
///
/// Items are immutable once created; many claims may reference one item.
/// `content_hash` is the dedup key: reprocessing the same raw content must
/// not create a second item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,

    /// The source this content came from
    pub source_id: SourceId,

    /// Optional title (articles usually have one, posts usually do not)
    pub title: Option<String>,

    /// Optional canonical URL
    pub url: Option<String>,

    /// Raw text body
    pub body: String,

    /// Content kind
    pub item_type: ItemType,

    /// When the content was published (seconds since Unix epoch)
    pub published_at: Option<u64>,

    /// When the content was ingested (seconds since Unix epoch)
    pub ingested_at: u64,

    /// Hex SHA-256 of the body; dedup key
    pub content_hash: String,
}

impl Item {
    /// Create a new item
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ItemId,
        source_id: SourceId,
        body: String,
        item_type: ItemType,
        ingested_at: u64,
        content_hash: String,
    ) -> Self {
        Self {
            id,
            source_id,
            title: None,
            url: None,
            body,
            item_type,
            published_at: None,
            ingested_at,
            content_hash,
        }
    }

    /// Attach a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a canonical URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach a published timestamp
    pub fn with_published_at(mut self, published_at: u64) -> Self {
        self.published_at = Some(published_at);
        self
    }
}
