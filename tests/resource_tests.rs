//! End-to-end tests for resource navigation against a mock webservice.

use std::sync::Arc;

use keyyo_manager::{
    AccessToken, BaseUrl, Client, ManagerConfig, QueryError, Resource, ResourceError,
};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CSI: &str = "33123456789";

fn create_client(server: &MockServer) -> Arc<Client> {
    let config = ManagerConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    Arc::new(Client::new(config).unwrap())
}

fn service(client: &Arc<Client>) -> Resource {
    client.root().member("services", CSI)
}

fn link(href: &str) -> Value {
    json!({"self": {"href": href}})
}

#[tokio::test]
async fn test_service_properties_exclude_metadata() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    let href = format!("{}/services/{CSI}", client.service_url());
    Mock::given(method("GET"))
        .and(path(format!("/1.0/services/{CSI}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_links": link(&href),
            "_resource_type": "service",
            "csi": CSI
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = service(&client);
    let properties = assert_ok!(service.properties().await).cloned().unwrap();

    assert_eq!(Value::Object(properties), json!({"csi": CSI}));
    assert_eq!(service.get("csi").await.unwrap(), CSI);
    assert_eq!(service.resource_type(), Some("service"));
}

#[tokio::test]
async fn test_create_csi_token_returns_new_member() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    let href = format!("{}/services/{CSI}/csi_token/abc", client.service_url());
    Mock::given(method("POST"))
        .and(path(format!("/1.0/services/{CSI}/csi_token")))
        .and(body_string(
            "domain_masks[0]=%2A.domain.com&domain_masks[1]=domain2.com",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_links": link(&href),
            "_resource_type": "csi_token",
            "token": "abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut token = service(&client)
        .collection("csi_token")
        .create(&json!({"domain_masks": ["*.domain.com", "domain2.com"]}))
        .await
        .unwrap();

    assert_eq!(token.url(), href);
    assert!(!token.is_collection());
    assert_eq!(token.get("token").await.unwrap(), "abc");
}

#[tokio::test]
async fn test_deleting_default_profile_surfaces_forbidden() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    Mock::given(method("DELETE"))
        .and(path(format!("/1.0/services/{CSI}/profiles/default")))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("X-Status-Reason", "Default profile cannot be deleted"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut profile = service(&client).member("profiles", "default");
    let error = assert_err!(profile.delete().await);

    match error.as_query_error() {
        Some(QueryError::Forbidden { reason }) => {
            assert_eq!(reason.as_deref(), Some("Default profile cannot be deleted"));
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_service_is_not_found() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    Mock::given(method("GET"))
        .and(path("/1.0/services/0"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut service = client.root().member("services", 0);
    let error = assert_err!(service.get("csi").await);

    assert!(matches!(
        error,
        ResourceError::Query(QueryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_iterating_cti_plugins() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    let root = format!("{}/services/{CSI}/cti_plugins", client.service_url());
    Mock::given(method("GET"))
        .and(path(format!("/1.0/services/{CSI}/cti_plugins")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_links": link(&root),
            "_embedded": {
                "cti_plugins": [
                    {"_links": link(&format!("{root}/salesforce")), "name": "salesforce", "enabled": true},
                    {"_links": link(&format!("{root}/zendesk")), "name": "zendesk", "enabled": false}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut plugins = service(&client).collection("cti_plugins");
    let mut names = Vec::new();
    for plugin in assert_ok!(plugins.members().await) {
        let plugin = plugin.unwrap();
        names.push(plugin.get("name").await.unwrap().clone());
    }

    assert_eq!(names, vec![json!("salesforce"), json!("zendesk")]);
    assert_eq!(plugins.at(1).await.unwrap().url(), format!("{root}/zendesk"));
}

#[tokio::test]
async fn test_filtered_collection_query() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    Mock::given(method("GET"))
        .and(path(format!("/1.0/services/{CSI}/cti_plugins/")))
        .and(query_param("filters[enabled]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": {"cti_plugins": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = json!({"enabled": true}).as_object().cloned().unwrap();
    let mut plugins = service(&client).filtered("cti_plugins", filters);

    assert_eq!(plugins.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_profile_reloads_representation() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    let href = format!("{}/services/{CSI}/profiles/4", client.service_url());
    Mock::given(method("POST"))
        .and(path(format!("/1.0/services/{CSI}/profiles/4")))
        .and(body_string("forward_delay=10&forward_to_voicemail=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_links": link(&href),
            "forward_delay": 10,
            "forward_to_voicemail": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut profile = service(&client).member("profiles", 4);
    assert_ok!(
        profile
            .update(&json!({"forward_delay": 10, "forward_to_voicemail": false}))
            .await
    );

    assert_eq!(profile.get("forward_delay").await.unwrap(), 10);
    assert_eq!(profile.get("forward_to_voicemail").await.unwrap(), false);
}

#[tokio::test]
async fn test_missing_property_after_successful_fetch() {
    let server = MockServer::start().await;
    let client = create_client(&server);
    Mock::given(method("GET"))
        .and(path(format!("/1.0/services/{CSI}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"csi": CSI})))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = service(&client);
    let error = assert_err!(service.get("label").await);

    assert!(matches!(error, ResourceError::NoSuchProperty { .. }));
    assert!(error.as_query_error().is_none());
}

#[tokio::test]
async fn test_resource_debug_masks_access_token() {
    let server = MockServer::start().await;
    let client = create_client(&server);

    let output = format!("{:?}", service(&client).member("profiles", 4));

    assert!(!output.contains("test-token"));
    assert!(output.contains("/profiles/4"));
}
