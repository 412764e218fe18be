//! Model types used as decode targets
//!
//! A deliberately small slice of the server's entity catalogue: just enough
//! structure for the endpoints this crate exposes. Wire names are the API's
//! snake_case JSON fields; timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user and their associated profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The account id
    pub id: String,
    /// The username, not including domain
    pub username: String,
    /// The Webfinger account URI
    pub acct: String,
    /// The location of the user's profile page
    pub url: String,
    /// The profile's display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// The profile's bio
    pub note: String,
    /// Image icon shown next to posts and in the profile
    pub avatar: String,
    /// A static version of the avatar
    #[serde(default)]
    pub avatar_static: Option<String>,
    /// Image banner shown above the profile
    pub header: String,
    /// A static version of the header
    pub header_static: String,
    /// Whether the account manually approves follow requests
    pub locked: bool,
    /// Custom emoji used when rendering the profile
    #[serde(default)]
    pub emojis: Vec<CustomEmoji>,
    /// Whether the account has opted into discovery features
    #[serde(default)]
    pub discoverable: Option<bool>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the most recent post was published (date only on some servers)
    #[serde(default)]
    pub last_status_at: Option<String>,
    /// How many posts are attached to this account
    pub statuses_count: u64,
    /// The reported followers of this profile
    pub followers_count: u64,
    /// The reported follows of this profile
    pub following_count: u64,
    /// Set when the profile is inactive and its user has moved
    #[serde(default)]
    pub moved: Option<Box<Account>>,
    /// Returned only when an account is suspended
    #[serde(default)]
    pub suspended: Option<bool>,
    /// Returned only when an account is silenced
    #[serde(default)]
    pub limited: Option<bool>,
    /// Additional metadata attached to the profile as name-value pairs
    #[serde(default)]
    pub fields: Vec<AccountField>,
    /// Indicates the account may perform automated actions
    #[serde(default)]
    pub bot: Option<bool>,
    /// Extra entity returned by credential verification endpoints
    #[serde(default)]
    pub source: Option<AccountSource>,
}

impl Account {
    /// Display name with `:shortcode:` references replaced by emoji markup
    pub fn rich_display_name(&self) -> Option<String> {
        let display_name = self.display_name.as_ref()?;
        Some(self.emojis.iter().fold(display_name.clone(), |markup, emoji| {
            markup.replace(
                &format!(":{}:", emoji.shortcode),
                &format!(
                    "<img src=\"{}\" alt=\"{}\" title=\"{}\">",
                    emoji.url, emoji.shortcode, emoji.shortcode
                ),
            )
        }))
    }
}

/// A custom emoji hosted by a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmoji {
    /// Shortcode, without the surrounding colons
    pub shortcode: String,
    /// URL of the emoji image
    pub url: String,
    /// URL of a static version of the image
    #[serde(default)]
    pub static_url: Option<String>,
    /// Whether the emoji is shown in the picker
    #[serde(default)]
    pub visible_in_picker: Option<bool>,
}

/// One name-value pair of profile metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountField {
    /// Field name
    pub name: String,
    /// Field value (may contain HTML)
    pub value: String,
    /// When the field value was verified, if ever
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
}

/// Source values used by credential verification and update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSource {
    /// Bio in plain text
    #[serde(default)]
    pub note: Option<String>,
    /// Default post privacy
    #[serde(default)]
    pub privacy: Option<String>,
    /// Whether media is marked sensitive by default
    #[serde(default)]
    pub sensitive: Option<bool>,
    /// Default post language
    #[serde(default)]
    pub language: Option<String>,
    /// Metadata fields in plain text
    #[serde(default)]
    pub fields: Vec<AccountField>,
}

/// A post published to the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// The post id
    pub id: String,
    /// URI of the post for federation
    #[serde(default)]
    pub uri: Option<String>,
    /// When the post was published
    pub created_at: DateTime<Utc>,
    /// The account that authored the post
    pub account: Account,
    /// HTML content of the post
    #[serde(default)]
    pub content: Option<String>,
    /// Visibility of the post
    #[serde(default)]
    pub visibility: Option<String>,
    /// Whether media is marked sensitive
    #[serde(default)]
    pub sensitive: Option<bool>,
    /// Subject or content warning
    #[serde(default)]
    pub spoiler_text: Option<String>,
    /// Media attached to the post
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachment>,
    /// How many boosts the post has received
    #[serde(default)]
    pub reblogs_count: u64,
    /// How many favourites the post has received
    #[serde(default)]
    pub favourites_count: u64,
    /// How many replies the post has received
    #[serde(default)]
    pub replies_count: u64,
    /// The boosted post, when this is a boost
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
}

/// Kind of media attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    /// Static image
    Image,
    /// Video clip
    Video,
    /// Looping, soundless animation
    Gifv,
    /// Audio track
    Audio,
    /// Unsupported or unrecognized type
    #[serde(other)]
    Unknown,
}

/// A file attached to a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAttachment {
    /// The attachment id
    pub id: String,
    /// Attachment kind
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    /// URL of the full-size file; absent while still processing
    #[serde(default)]
    pub url: Option<String>,
    /// URL of a scaled-down preview
    #[serde(default)]
    pub preview_url: Option<String>,
    /// URL of the file on the remote server, for remote attachments
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Alternate text for accessibility
    #[serde(default)]
    pub description: Option<String>,
    /// Blurhash placeholder
    #[serde(default)]
    pub blurhash: Option<String>,
    /// Server-specific metadata (dimensions, focus, durations)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

/// General information about a server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// The server's domain
    pub uri: String,
    /// Title of the server
    pub title: String,
    /// Admin-provided description
    #[serde(default)]
    pub description: Option<String>,
    /// Short admin-provided description
    #[serde(default)]
    pub short_description: Option<String>,
    /// Admin contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Version of the server software
    pub version: String,
    /// Primary languages of the server
    #[serde(default)]
    pub languages: Vec<String>,
    /// Usage statistics
    #[serde(default)]
    pub stats: Option<InstanceStats>,
    /// Banner image for the server
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Server usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStats {
    /// Registered users
    #[serde(default)]
    pub user_count: u64,
    /// Published posts
    #[serde(default)]
    pub status_count: u64,
    /// Known peer domains
    #[serde(default)]
    pub domain_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_json() -> serde_json::Value {
        serde_json::json!({
            "id": "1",
            "username": "alice",
            "acct": "alice@mastodon.example",
            "url": "https://mastodon.example/@alice",
            "display_name": "Alice :wave:",
            "note": "<p>hi</p>",
            "avatar": "https://mastodon.example/avatars/alice.png",
            "header": "https://mastodon.example/headers/alice.png",
            "header_static": "https://mastodon.example/headers/alice.png",
            "locked": false,
            "emojis": [{
                "shortcode": "wave",
                "url": "https://mastodon.example/emoji/wave.png"
            }],
            "created_at": "2022-11-02T12:00:00.000Z",
            "statuses_count": 12,
            "followers_count": 3,
            "following_count": 5,
            "fields": [{"name": "site", "value": "example.com"}]
        })
    }

    #[test]
    fn test_account_decodes_from_api_json() {
        let account: Account = serde_json::from_value(account_json()).unwrap();
        assert_eq!(account.id, "1");
        assert_eq!(account.display_name.as_deref(), Some("Alice :wave:"));
        assert_eq!(account.emojis.len(), 1);
        assert_eq!(account.fields[0].name, "site");
        assert!(account.bot.is_none());
    }

    #[test]
    fn test_rich_display_name_replaces_emoji_shortcodes() {
        let account: Account = serde_json::from_value(account_json()).unwrap();
        let rich = account.rich_display_name().unwrap();
        assert_eq!(
            rich,
            "Alice <img src=\"https://mastodon.example/emoji/wave.png\" alt=\"wave\" title=\"wave\">"
        );
    }

    #[test]
    fn test_attachment_type_unknown_fallback() {
        let attachment: MediaAttachment = serde_json::from_value(serde_json::json!({
            "id": "7",
            "type": "hologram"
        }))
        .unwrap();
        assert_eq!(attachment.kind, AttachmentType::Unknown);
        assert!(attachment.url.is_none());
    }

    #[test]
    fn test_instance_decodes_with_minimal_fields() {
        let instance: Instance = serde_json::from_value(serde_json::json!({
            "uri": "mastodon.example",
            "title": "Example",
            "version": "4.2.1"
        }))
        .unwrap();
        assert_eq!(instance.uri, "mastodon.example");
        assert!(instance.stats.is_none());
        assert!(instance.languages.is_empty());
    }
}
