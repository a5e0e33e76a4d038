use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::Country;

/// Read-only country lookups on `/countries`.
#[derive(Debug, Clone, Copy)]
pub struct CountriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CountriesApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_countries(&self) -> Result<Vec<Country>, ApiError> {
        self.client.get("/countries").await
    }

    pub async fn get_country(&self, id: &str) -> Result<Country, ApiError> {
        self.client.get(&format!("/countries/{id}")).await
    }

    /// Looks a country up by its ISO alpha-2 or alpha-3 code.
    pub async fn get_country_by_code(&self, code: &str) -> Result<Country, ApiError> {
        self.client.get(&format!("/countries/code/{code}")).await
    }
}
