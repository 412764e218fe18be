//! Server flavours and their decode quirks
//!
//! Federated servers speak the same API with minor dialect deviations. The
//! deviations that affect response decoding are kept in one explicit table
//! keyed by (flavour, endpoint class, status code), checked before generic
//! JSON decoding, instead of conditionals scattered through decode paths.

use serde::{Deserialize, Serialize};

/// Server implementation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavour {
    /// Vanilla Mastodon
    Mastodon,
    /// Pleroma
    Pleroma,
    /// Pixelfed
    Pixelfed,
    /// Friendica
    Friendica,
    /// Akkoma
    Akkoma,
}

/// Class of endpoint a decode override applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointClass {
    /// No flavour-specific decode behaviour
    General,
    /// Media attachment status endpoints (`api/v1/media/{id}`)
    MediaStatus,
}

/// Outcome a decode override substitutes for generic decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOverride {
    /// The resource exists but has no content yet; decode to "no value"
    NoContentYet,
}

/// The full override table
///
/// Mastodon returns 206 from the media status endpoint while an attachment
/// is still processing; that is not an error, there is just no attachment
/// to decode yet. No other flavour gets this exception.
const DECODE_OVERRIDES: &[(Flavour, EndpointClass, u16, DecodeOverride)] =
    &[(Flavour::Mastodon, EndpointClass::MediaStatus, 206, DecodeOverride::NoContentYet)];

/// Look up the decode override for a response, if any
pub fn decode_override(
    flavour: Flavour,
    class: EndpointClass,
    status: u16,
) -> Option<DecodeOverride> {
    DECODE_OVERRIDES
        .iter()
        .find(|(f, c, s, _)| *f == flavour && *c == class && *s == status)
        .map(|(_, _, _, outcome)| *outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mastodon_media_processing_override() {
        assert_eq!(
            decode_override(Flavour::Mastodon, EndpointClass::MediaStatus, 206),
            Some(DecodeOverride::NoContentYet)
        );
    }

    #[test]
    fn test_other_flavours_get_no_override() {
        for flavour in [Flavour::Pleroma, Flavour::Pixelfed, Flavour::Friendica, Flavour::Akkoma] {
            assert_eq!(decode_override(flavour, EndpointClass::MediaStatus, 206), None);
        }
    }

    #[test]
    fn test_override_is_scoped_to_endpoint_class_and_status() {
        assert_eq!(decode_override(Flavour::Mastodon, EndpointClass::General, 206), None);
        assert_eq!(decode_override(Flavour::Mastodon, EndpointClass::MediaStatus, 200), None);
    }

    #[test]
    fn test_flavour_serde() {
        assert_eq!(serde_json::to_string(&Flavour::Mastodon).unwrap(), "\"mastodon\"");
        let parsed: Flavour = serde_json::from_str("\"pleroma\"").unwrap();
        assert_eq!(parsed, Flavour::Pleroma);
    }
}
