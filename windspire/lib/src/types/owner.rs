use serde::{Deserialize, Serialize};

/// A registry user who can own boats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: String,
    pub email: String,
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(alias = "last_name")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(alias = "country_id")]
    pub country_id: String,
    #[serde(default, alias = "iso_name", skip_serializing_if = "Option::is_none")]
    pub iso_name: Option<String>,
    #[serde(default, alias = "provider_id", skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, alias = "provider_name", skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, alias = "avatar_url", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Owner {
    /// `"First Last"`, as shown in owner pickers.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match on first name, last name, or email.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.first_name, &self.last_name, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_owner_from_backend_row() {
        let owner: Owner = serde_json::from_value(json!({
            "id": "u-1",
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@example.com",
            "phone": null,
            "country_id": "c-fi",
            "iso_name": "Finland"
        }))
        .unwrap();

        assert_eq!(owner.display_name(), "Jane Doe");
        assert_eq!(owner.iso_name.as_deref(), Some("Finland"));
        assert_eq!(owner.phone, None);
    }

    #[test]
    fn test_matches_lowercase() {
        let owner: Owner = serde_json::from_value(json!({
            "id": "u-2",
            "firstName": "Mary",
            "lastName": "Janeway",
            "email": "captain@VOYAGER.example",
            "countryId": "c-us"
        }))
        .unwrap();

        assert!(owner.matches_lowercase("jane"));
        assert!(owner.matches_lowercase("voyager"));
        assert!(!owner.matches_lowercase("kirk"));
    }
}
