//! Estate endpoints, authorized with the client token

use serde_json::{json, Map, Value};
use whise_domain::{EstateQuery, Result};

use super::client::{language_body, to_body, ApiClient, AuthScope};

#[derive(Clone)]
pub struct EstatesClient {
    api: ApiClient,
}

impl EstatesClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &EstateQuery) -> Result<Value> {
        self.api.post(AuthScope::Client, "/v1/estates/list", query, "Error fetching estates").await
    }

    /// Estates owned by a contact, authenticated with the contact's own
    /// login. Keys in `query` win over the credential fields.
    pub async fn owned(
        &self,
        username: &str,
        password: &str,
        query: &EstateQuery,
    ) -> Result<Value> {
        let mut body = Map::new();
        body.insert("ContactUsername".into(), Value::from(username));
        body.insert("ContactPassword".into(), Value::from(password));
        if let Value::Object(query) = to_body(query)? {
            body.extend(query);
        }

        self.api
            .post(
                AuthScope::Client,
                "/v1/estates/owned/list",
                &Value::Object(body),
                "Error fetching owned estates",
            )
            .await
    }

    pub async fn regions(&self, language_id: Option<&str>) -> Result<Value> {
        self.api
            .post(
                AuthScope::Client,
                "/v1/estates/regions/list",
                &language_body(language_id),
                "Error fetching regions",
            )
            .await
    }

    /// Sub-detail definitions.
    pub async fn details(&self, options: &Value) -> Result<Value> {
        self.api
            .post(
                AuthScope::Client,
                "/v1/estates/details/list",
                options,
                "Error fetching sub-details",
            )
            .await
    }

    pub async fn used_cities(&self, estate_filter: &Value) -> Result<Value> {
        self.api
            .post(
                AuthScope::Client,
                "/v1/estates/usedcities/list",
                &json!({ "EstateFilter": estate_filter }),
                "Error fetching used cities",
            )
            .await
    }

    pub async fn used_countries(&self, estate_filter: &Value) -> Result<Value> {
        self.api
            .post(
                AuthScope::Client,
                "/v1/estates/usedcountries/list",
                &json!({ "EstateFilter": estate_filter }),
                "Error fetching used countries",
            )
            .await
    }

    /// Top-level projects.
    pub async fn projects(&self, query: EstateQuery) -> Result<Value> {
        self.list(&query.filter("IsTopParent", true)).await
    }

    /// Every estate belonging to `project_id`.
    pub async fn project_with_units(&self, project_id: u64, query: EstateQuery) -> Result<Value> {
        self.list(&query.filter("ProjectId", project_id)).await
    }

    pub async fn sub_projects(&self, query: EstateQuery) -> Result<Value> {
        self.list(&query.filter("IsTopParent", false).filter("CanHaveChildren", true)).await
    }

    /// Estates that are neither part of a project nor a project themselves.
    pub async fn standalone_estates(&self, query: EstateQuery) -> Result<Value> {
        self.list(&query.filter("HasParent", false).filter("CanHaveChildren", false)).await
    }
}
