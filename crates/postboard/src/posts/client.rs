use crate::prelude::Error;
use postboard_core::posts::{parse_posts_response, Post};

use super::PostsConfig;

/// Fetch every post from the configured endpoint
///
/// A single attempt. Transport failures and non-success statuses come back as
/// [`Error::Network`] carrying the underlying message as-is.
pub async fn fetch_posts(client: &reqwest::Client, config: &PostsConfig) -> Result<Vec<Post>, Error> {
    log::debug!("GET {}", config.api_url);

    let response = client
        .get(&config.api_url)
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    let status = response.status();
    log::debug!("{} responded with {}", config.api_url, status);

    if !status.is_success() {
        return Err(Error::Network(format!(
            "Failed to load posts from {}: HTTP {}",
            config.api_url, status
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    let posts = parse_posts_response(&body).map_err(|e| Error::InvalidResponse(e.to_string()))?;
    log::debug!("loaded {} posts", posts.len());

    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_RESPONSE: &str = r#"{
        "posts": [
            {"id": 1, "title": "First", "body": "One", "userId": 4, "tags": ["history"], "reactions": {"likes": 12, "dislikes": 1}},
            {"id": 2, "title": "Second", "body": "Two", "userId": 9, "tags": [], "likes": 3, "dislikes": 0}
        ],
        "total": 2,
        "skip": 0,
        "limit": 30
    }"#;

    fn create_test_config(server: &MockServer) -> PostsConfig {
        PostsConfig::default().with_overrides(Some(format!("{}/posts", server.uri())))
    }

    #[tokio::test]
    async fn test_fetch_posts_decodes_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_RESPONSE))
            .expect(1)
            .mount(&server)
            .await;

        let posts = fetch_posts(&reqwest::Client::new(), &create_test_config(&server))
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "First");
        assert_eq!(posts[0].likes(), 12);
        assert_eq!(posts[1].likes(), 3);
        assert_eq!(posts[1].user_id, 9);
    }

    #[tokio::test]
    async fn test_fetch_posts_server_error_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let error = fetch_posts(&reqwest::Client::new(), &create_test_config(&server))
            .await
            .unwrap_err();

        match &error {
            Error::Network(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("/posts"));
            }
            other => panic!("expected a network error, got {other:?}"),
        }
        assert!(error.to_string().starts_with("Network error: "));
    }

    #[tokio::test]
    async fn test_fetch_posts_non_json_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let error = fetch_posts(&reqwest::Client::new(), &create_test_config(&server))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::InvalidResponse(_)));
        assert!(error.to_string().starts_with("Invalid response: "));
    }

    #[tokio::test]
    async fn test_fetch_posts_unreachable_host_is_network_error() {
        // Nothing listens on the discard port.
        let config = PostsConfig::default().with_overrides(Some("http://127.0.0.1:9/posts".to_string()));

        let error = fetch_posts(&reqwest::Client::new(), &config)
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Network(_)));
    }
}
