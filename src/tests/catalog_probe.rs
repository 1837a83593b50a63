#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    use crate::catalog::CatalogClient;
    use crate::error::CatalogError;
    use crate::lifecycle::AuthorizedContext;
    use crate::store::CredentialRecord;

    fn context(user_token: Option<&str>) -> AuthorizedContext {
        let now = Utc::now();
        AuthorizedContext::from_record(CredentialRecord {
            developer_token: "dev-token-123".to_owned(),
            user_token: user_token.map(str::to_owned),
            expires_at: now + chrono::Duration::days(1),
            created_at: now,
        })
    }

    #[tokio::test]
    async fn storefront_probe_sends_bearer_and_parses_storefront() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/me/storefront")
                    .header("authorization", "Bearer dev-token-123")
                    .header_missing("music-user-token");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "data": [{
                            "id": "us",
                            "type": "storefronts",
                            "attributes": {
                                "name": "United States",
                                "defaultLanguageTag": "en-US",
                                "supportedLanguageTags": ["en-US", "es-MX"]
                            }
                        }]
                    }));
            })
            .await;

        let client = CatalogClient::new(&server.base_url()).expect("client");
        let probe = client
            .storefront(&context(None), Duration::from_secs(5))
            .await
            .expect("probe");

        mock.assert_async().await;
        assert_eq!(probe.api_response_status, 200);
        let storefront = probe.storefront.expect("storefront");
        assert_eq!(storefront.id, "us");
        assert_eq!(storefront.kind, "storefronts");
        assert_eq!(storefront.name, "United States");
        assert_eq!(storefront.default_language, "en-US");
        assert_eq!(storefront.supported_languages, vec!["en-US", "es-MX"]);
    }

    #[tokio::test]
    async fn user_token_is_attached_when_present() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/me/storefront")
                    .header("authorization", "Bearer dev-token-123")
                    .header("music-user-token", "user-token-456");
                then.status(200).json_body(json!({ "data": [] }));
            })
            .await;

        let client = CatalogClient::new(&format!("{}/", server.base_url())).expect("client");
        let probe = client
            .storefront(&context(Some("user-token-456")), Duration::from_secs(5))
            .await
            .expect("probe");

        mock.assert_async().await;
        assert!(probe.storefront.is_none());
    }

    #[tokio::test]
    async fn rejected_token_is_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/me/storefront");
                then.status(401).body("unauthorized");
            })
            .await;

        let client = CatalogClient::new(&server.base_url()).expect("client");
        let err = client
            .storefront(&context(None), Duration::from_secs(5))
            .await
            .unwrap_err();

        match err {
            CatalogError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_catalog_is_aborted_with_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/me/storefront");
                then.status(200)
                    .delay(Duration::from_secs(2))
                    .json_body(json!({ "data": [] }));
            })
            .await;

        let client = CatalogClient::new(&server.base_url()).expect("client");
        let timeout = Duration::from_millis(100);
        let err = client.storefront(&context(None), timeout).await.unwrap_err();

        assert!(matches!(err, CatalogError::Timeout(t) if t == timeout), "got {:?}", err);
    }
}
