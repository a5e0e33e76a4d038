use serde::{Deserialize, Serialize};

/// A country boats and users can be registered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
    #[serde(alias = "iso_name")]
    pub name: String,
    #[serde(alias = "iso_alpha_2")]
    pub iso_alpha2: String,
    #[serde(alias = "iso_alpha_3")]
    pub iso_alpha3: String,
}
