use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Suffix that marks an identifier as a group chat.
pub const GROUP_SUFFIX: &str = "@g.us";

/// Pseudo-chat carrying status updates. Never an actor.
pub const BROADCAST_ID: &str = "status@broadcast";

/// Opaque messaging identifier for a person, a group or the account owner.
/// Never blank; construct through [`Wid::parse`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Wid(String);

impl Wid {
    /// Parse a raw identifier, trimming whitespace. Blank input yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_group(&self) -> bool {
        looks_like_group_id(&self.0)
    }

    pub fn is_broadcast(&self) -> bool {
        self.0 == BROADCAST_ID
    }

    /// The part before `@`, usually the phone number.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

/// Whether a free-form string has the shape of a group identifier.
pub fn looks_like_group_id(s: &str) -> bool {
    s.ends_with(GROUP_SUFFIX)
}

impl fmt::Debug for Wid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wid({})", self.0)
    }
}

impl fmt::Display for Wid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Wid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Wid::parse(&raw).ok_or_else(|| D::Error::custom("identifier must not be blank"))
    }
}

/// Serde helper for record fields whose id may be missing or blank.
pub fn deserialize_optional_wid<'de, D>(deserializer: D) -> Result<Option<Wid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Wid::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank() {
        assert!(Wid::parse("").is_none());
        assert!(Wid::parse("   ").is_none());
    }

    #[test]
    fn parse_trims() {
        assert_eq!(Wid::parse(" 491@c.us ").unwrap().as_str(), "491@c.us");
    }

    #[test]
    fn group_suffix_detected() {
        assert!(Wid::parse("1234-5678@g.us").unwrap().is_group());
        assert!(!Wid::parse("491@c.us").unwrap().is_group());
    }

    #[test]
    fn broadcast_detected() {
        assert!(Wid::parse(BROADCAST_ID).unwrap().is_broadcast());
    }

    #[test]
    fn local_part_strips_domain() {
        assert_eq!(Wid::parse("4915112345@c.us").unwrap().local_part(), "4915112345");
        assert_eq!(Wid::parse("plain").unwrap().local_part(), "plain");
    }

    #[test]
    fn optional_wid_maps_blank_to_none() {
        #[derive(Deserialize)]
        struct Rec {
            #[serde(default, deserialize_with = "deserialize_optional_wid")]
            id: Option<Wid>,
        }
        let blank: Rec = serde_json::from_str(r#"{"id": "  "}"#).unwrap();
        assert!(blank.id.is_none());
        let missing: Rec = serde_json::from_str("{}").unwrap();
        assert!(missing.id.is_none());
        let present: Rec = serde_json::from_str(r#"{"id": "a@c.us"}"#).unwrap();
        assert_eq!(present.id.unwrap().as_str(), "a@c.us");
    }

    #[test]
    fn deserialize_trims_and_rejects_blank() {
        let id: Wid = serde_json::from_str(r#"" 1@c.us ""#).unwrap();
        assert_eq!(id.as_str(), "1@c.us");
        assert!(serde_json::from_str::<Wid>(r#""   ""#).is_err());
    }
}
