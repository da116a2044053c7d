//! Contact endpoints, authorized with the client token

use serde_json::Value;
use whise_domain::{Contact, Result};

use super::client::{language_body, ApiClient, AuthScope};

#[derive(Clone)]
pub struct ContactsClient {
    api: ApiClient,
}

impl ContactsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create a contact.
    ///
    /// Name, country, language and at least one office are checked locally
    /// before anything is sent.
    pub async fn create(&self, contact: &Contact) -> Result<Value> {
        contact.validate_for_create()?;
        self.api
            .post(AuthScope::Client, "/v1/contacts/create", contact, "Error creating contact")
            .await
    }

    /// Create or update a contact matched on its private email.
    pub async fn upsert(&self, contact: &Contact) -> Result<Value> {
        contact.validate_for_upsert()?;
        self.api
            .post(AuthScope::Client, "/v1/contacts/upsert", contact, "Error upserting contact")
            .await
    }

    pub async fn origins(&self, language_id: Option<&str>) -> Result<Value> {
        self.lookup("/v1/contacts/origins/list", language_id, "Error fetching contact origins")
            .await
    }

    pub async fn titles(&self, language_id: Option<&str>) -> Result<Value> {
        self.lookup("/v1/contacts/titles/list", language_id, "Error fetching contact titles").await
    }

    pub async fn types(&self, language_id: Option<&str>) -> Result<Value> {
        self.lookup("/v1/contacts/types/list", language_id, "Error fetching contact types").await
    }

    /// Create a contact together with the search profiles it should be
    /// matched against.
    pub async fn create_with_search_criteria(
        &self,
        mut contact: Contact,
        search_criteria: Vec<Value>,
    ) -> Result<Value> {
        contact.search_criteria = Some(search_criteria);
        self.create(&contact).await
    }

    async fn lookup(&self, path: &str, language_id: Option<&str>, context: &str) -> Result<Value> {
        self.api.post(AuthScope::Client, path, &language_body(language_id), context).await
    }
}
