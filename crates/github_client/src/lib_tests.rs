//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Test Constants ---
const TEST_TOKEN: &str = "ghp_test_token";

fn client_for(mock_server: &MockServer) -> GitHubClient {
    let config = ApiConfig::new(&mock_server.uri()).expect("mock server uri is valid");
    let octocrab = create_token_client(&config, TEST_TOKEN).expect("client builds");
    GitHubClient::new(octocrab)
}

fn repository_page(owner: &str, start: usize, count: usize) -> Value {
    let repos: Vec<Value> = (start..start + count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("repo-{i}"),
                "full_name": format!("{owner}/repo-{i}"),
                "owner": { "login": owner, "id": 1, "type": "User" },
                "private": i % 2 == 0,
                "default_branch": "main"
            })
        })
        .collect();
    Value::Array(repos)
}

#[tokio::test]
async fn test_fetch_authenticated_user_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "id": 1,
            "type": "User"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let user = client
        .fetch_authenticated_user()
        .await
        .expect("request succeeds");

    assert_eq!(
        user,
        Some(User {
            id: 1,
            login: "octocat".to_string()
        })
    );
}

#[tokio::test]
async fn test_fetch_authenticated_user_unauthorized_returns_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let user = client
        .fetch_authenticated_user()
        .await
        .expect("non-200 is not an error");

    assert!(user.is_none());
}

#[tokio::test]
async fn test_fetch_organizations_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "login": "acme", "id": 10 },
            { "login": "globex", "id": 11 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let orgs = client.fetch_organizations().await.expect("request succeeds");

    let logins: Vec<&str> = orgs.iter().map(|o| o.login.as_str()).collect();
    assert_eq!(logins, vec!["acme", "globex"]);
}

#[tokio::test]
async fn test_fetch_organizations_failure_returns_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Forbidden"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let orgs = client
        .fetch_organizations()
        .await
        .expect("non-200 is not an error");

    assert!(orgs.is_empty());
}

#[tokio::test]
async fn test_fetch_repositories_pages_until_short_page() {
    let mock_server = MockServer::start().await;

    for page in 1..=3 {
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .and(query_param("page", page.to_string().as_str()))
            .and(query_param("per_page", "100"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(repository_page("octocat", (page - 1) * 100, 100)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("page", "4"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repository_page("octocat", 300, 37)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let repos = client
        .fetch_repositories(&RepositoryScope::AuthenticatedUser)
        .await
        .expect("request succeeds");

    assert_eq!(repos.len(), 337);
    assert_eq!(repos[0].name(), "repo-0");
    assert_eq!(repos[336].name(), "repo-336");
}

#[tokio::test]
async fn test_fetch_repositories_single_short_page_makes_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repository_page("acme", 0, 5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let repos = client
        .fetch_repositories(&RepositoryScope::Organization("acme".to_string()))
        .await
        .expect("request succeeds");

    assert_eq!(repos.len(), 5);
    assert!(repos.iter().all(|r| r.owner() == "acme"));
}

#[tokio::test]
async fn test_fetch_repositories_empty_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let repos = client
        .fetch_repositories(&RepositoryScope::AuthenticatedUser)
        .await
        .expect("request succeeds");

    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_fetch_repositories_error_keeps_earlier_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repository_page("acme", 0, 100)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let repos = client
        .fetch_repositories(&RepositoryScope::Organization("acme".to_string()))
        .await
        .expect("non-200 is not an error");

    assert_eq!(repos.len(), 100);
}

#[tokio::test]
async fn test_fetch_repositories_first_page_error_returns_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let repos = client
        .fetch_repositories(&RepositoryScope::AuthenticatedUser)
        .await
        .expect("non-200 is not an error");

    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_fetch_file_revision_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/tool/contents/.github/workflows/build.yml"))
        .and(query_param("ref", "master"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "name": "build.yml",
            "path": ".github/workflows/build.yml",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let sha = client
        .fetch_file_revision("acme", "tool", ".github/workflows/build.yml", Some("master"))
        .await
        .expect("request succeeds");

    assert_eq!(
        sha.as_deref(),
        Some("3d21ec53a331a6f037a91c368710b99387d012c1")
    );
}

#[tokio::test]
async fn test_fetch_file_revision_missing_file_returns_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/tool/contents/.github/workflows/build.yml"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let sha = client
        .fetch_file_revision("acme", "tool", ".github/workflows/build.yml", None)
        .await
        .expect("non-200 is not an error");

    assert!(sha.is_none());
}

#[tokio::test]
async fn test_create_or_update_file_reports_created() {
    let mock_server = MockServer::start().await;
    let payload = FileWritePayload::new("Add new file: build.yml", "bmFtZTogY2k=", "master");

    Mock::given(method("PUT"))
        .and(path("/repos/acme/tool/contents/.github/workflows/build.yml"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(body_json(json!({
            "message": "Add new file: build.yml",
            "content": "bmFtZTogY2k=",
            "branch": "master"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": { "sha": "95b966ae1c166bd92f8ae7d1c313e738c731dfc3" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let outcome = client
        .create_or_update_file("acme", "tool", ".github/workflows/build.yml", &payload)
        .await
        .expect("request succeeds");

    assert!(outcome.is_created());
}

#[tokio::test]
async fn test_create_or_update_file_passes_conflict_through() {
    let mock_server = MockServer::start().await;
    let payload = FileWritePayload::new("Add new file: build.yml", "bmFtZTogY2k=", "master");

    Mock::given(method("PUT"))
        .and(path("/repos/acme/tool/contents/.github/workflows/build.yml"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Invalid request.\n\n\"sha\" wasn't supplied."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let outcome = client
        .create_or_update_file("acme", "tool", ".github/workflows/build.yml", &payload)
        .await
        .expect("a 422 is returned, not raised");

    assert!(outcome.is_conflict());
    assert!(outcome.body.contains("wasn't supplied"));
}

#[tokio::test]
async fn test_create_or_update_file_sends_sha_on_update() {
    let mock_server = MockServer::start().await;
    let payload = FileWritePayload::new("Update file: build.yml", "bmFtZTogY2k=", "master")
        .with_sha(Some("abc123".to_string()));

    Mock::given(method("PUT"))
        .and(path("/repos/acme/tool/contents/.github/workflows/build.yml"))
        .and(body_json(json!({
            "message": "Update file: build.yml",
            "content": "bmFtZTogY2k=",
            "branch": "master",
            "sha": "abc123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let outcome = client
        .create_or_update_file("acme", "tool", ".github/workflows/build.yml", &payload)
        .await
        .expect("request succeeds");

    assert_eq!(outcome.status, 200);
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_unreachable_host_is_a_request_error() {
    let config = ApiConfig::new("http://127.0.0.1:1").expect("uri is valid");
    let client = GitHubClient::new(create_token_client(&config, TEST_TOKEN).expect("client builds"));

    let result = client.fetch_organizations().await;

    assert!(matches!(result, Err(Error::RequestFailed(_))));
}

#[tokio::test]
async fn test_create_token_client_accepts_default_config() {
    let result = create_token_client(&ApiConfig::default(), TEST_TOKEN);

    assert!(result.is_ok());
}
