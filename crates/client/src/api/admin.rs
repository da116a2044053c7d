//! Account-level administration endpoints

use reqwest::Method;
use serde_json::{json, Value};
use whise_domain::{Result, WhiseError};

use super::client::{ApiClient, AuthScope};

/// Clients, offices and representatives visible to the marketplace account.
#[derive(Clone)]
pub struct AdminClient {
    api: ApiClient,
}

impl AdminClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List the clients the account has access to.
    pub async fn clients(&self, options: &Value) -> Result<Value> {
        self.api
            .post(AuthScope::Account, "/v1/admin/clients/list", options, "Error fetching clients")
            .await
    }

    /// Settings of one client, optionally narrowed to an office.
    pub async fn client_settings(&self, client_id: u64, office_id: Option<u64>) -> Result<Value> {
        require_id(client_id, "Client ID is required")?;

        let mut body = json!({ "ClientId": client_id });
        if let Some(office_id) = office_id.filter(|id| *id != 0) {
            body["OfficeId"] = json!(office_id);
        }

        self.api
            .post(
                AuthScope::Account,
                "/v1/admin/clients/settings",
                &body,
                "Error fetching client settings",
            )
            .await
    }

    /// Point a client's estate detail pages at `detail_page_url`.
    pub async fn update_client_settings(
        &self,
        client_id: u64,
        detail_page_url: &str,
    ) -> Result<Value> {
        require_id(client_id, "Client ID is required")?;
        if detail_page_url.is_empty() {
            return Err(WhiseError::Configuration("Detail page URL is required".into()));
        }

        let body = json!({ "ClientId": client_id, "DetailPageUrl": detail_page_url });
        self.api
            .call(
                AuthScope::Account,
                Method::PATCH,
                "/v1/admin/clients/settings/update",
                Some(&body),
                "Error updating client settings",
            )
            .await
    }

    pub async fn offices(&self, options: &Value) -> Result<Value> {
        self.api
            .post(AuthScope::Account, "/v1/admin/offices/list", options, "Error fetching offices")
            .await
    }

    pub async fn representatives(&self, office_id: u64) -> Result<Value> {
        require_id(office_id, "Office ID is required")?;

        self.api
            .post(
                AuthScope::Account,
                "/v1/admin/representatives/list",
                &json!({ "OfficeId": office_id }),
                "Error fetching representatives",
            )
            .await
    }
}

fn require_id(id: u64, message: &str) -> Result<()> {
    if id == 0 {
        return Err(WhiseError::Configuration(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::client::test_support::api;

    #[tokio::test]
    async fn client_settings_omits_missing_office() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/clients/settings"))
            .and(header("authorization", "Bearer account"))
            .and(body_json(json!({ "ClientId": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "settings": {} })))
            .expect(1)
            .mount(&server)
            .await;

        AdminClient::new(api(&server)).client_settings(5, None).await.expect("settings");
    }

    #[tokio::test]
    async fn update_client_settings_patches() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/admin/clients/settings/update"))
            .and(body_json(json!({ "ClientId": 5, "DetailPageUrl": "https://example.test/{id}" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let value = AdminClient::new(api(&server))
            .update_client_settings(5, "https://example.test/{id}")
            .await
            .expect("update");

        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn missing_ids_fail_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let admin = AdminClient::new(api(&server));

        assert_eq!(
            admin.client_settings(0, Some(3)).await.unwrap_err(),
            WhiseError::Configuration("Client ID is required".into())
        );
        assert_eq!(
            admin.update_client_settings(5, "").await.unwrap_err(),
            WhiseError::Configuration("Detail page URL is required".into())
        );
        assert_eq!(
            admin.representatives(0).await.unwrap_err(),
            WhiseError::Configuration("Office ID is required".into())
        );
    }

    #[tokio::test]
    async fn server_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/admin/representatives/list"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "Office not found" })),
            )
            .mount(&server)
            .await;

        let err = AdminClient::new(api(&server)).representatives(9).await.unwrap_err();

        assert_eq!(err.to_string(), r#"Office not found (404): {"message":"Office not found"}"#);
    }
}
