//! Off-chain token metadata document

use serde::{Deserialize, Serialize};

use crate::models::MintRequest;

/// JSON document uploaded alongside the icon image
///
/// `name`, `symbol`, `image` and `description` are always present;
/// social links are emitted only when the form field was non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
}

impl MetadataDocument {
    /// Build the document from the request once the image URI is known
    pub fn new(request: &MintRequest, image_uri: String) -> Self {
        Self {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            image: image_uri,
            description: request.description.clone(),
            website: nonempty(&request.website),
            twitter: nonempty(&request.twitter),
            telegram: nonempty(&request.telegram),
            discord: nonempty(&request.discord),
        }
    }
}

fn nonempty(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MintRequest {
        MintRequest {
            name: "Foo".to_string(),
            symbol: "FOO".to_string(),
            description: "A test token".to_string(),
            supply: "10000".to_string(),
            decimals: "2".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_socials_are_omitted() {
        let mut req = request();
        req.twitter = Some("".to_string());
        req.discord = Some("   ".to_string());

        let doc = MetadataDocument::new(&req, "https://shdw.example/foo.png".to_string());
        let json = serde_json::to_value(&doc).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for key in ["name", "symbol", "image", "description"] {
            assert!(obj.contains_key(key), "{} must always be present", key);
        }
        assert!(!obj.contains_key("twitter"));
        assert!(!obj.contains_key("discord"));
    }

    #[test]
    fn test_present_socials_are_kept() {
        let mut req = request();
        req.website = Some("https://foo.example".to_string());
        req.telegram = Some("@foo".to_string());

        let doc = MetadataDocument::new(&req, "https://shdw.example/foo.png".to_string());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["website"], "https://foo.example");
        assert_eq!(json["telegram"], "@foo");
        assert_eq!(json["image"], "https://shdw.example/foo.png");
        assert!(json.get("twitter").is_none());
    }
}
