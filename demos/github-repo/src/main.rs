//! GitHub repository lookup
//!
//! Demonstrates triage's status-driven response handling against the GitHub
//! REST API.
//!
//! ```text
//! cargo run -p github-repo-demo -- rust-lang rust
//! RUST_LOG=debug cargo run -p github-repo-demo -- octocat does-not-exist
//! ```

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;
use triage::prelude::*;

const GITHUB_API: &str = "https://api.github.com";

// ============================================================================
// Data Types
// ============================================================================

/// A GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
}

/// Error body returned by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Everything `GET /repos/{owner}/{repo}` can answer.
#[derive(Debug, Clone, PartialEq, Eq, StatusOutcomes)]
pub enum GetRepo {
    #[status(200)]
    Found(serde_json::Value),
    #[status(301)]
    Moved,
    #[status(403)]
    Forbidden(ApiMessage),
    #[status(404)]
    NotFound,
}

// ============================================================================
// Handlers
// ============================================================================

/// Handlers for every declared outcome.
///
/// The 200 payload is kept as raw JSON and checked against [`Repository`]:
/// a shape change on GitHub's side shows up as diagnostics, not as a failure.
fn repo_triage() -> triage::Result<Triage<GetRepo>> {
    Triage::for_outcomes::<GetRepo>()
        .handle_with(
            200,
            Handler::new(|payload: Payload| payload.into_json())
                .schema(typed::<Repository>()),
        )?
        .map(GetRepo::Found)
        .handle(301, |_| GetRepo::Moved)?
        .handle_json(403, GetRepo::Forbidden)?
        .handle(404, |_| GetRepo::NotFound)
}

/// One-line summary of an outcome.
fn describe(outcome: &GetRepo) -> String {
    match outcome {
        GetRepo::Found(repo) => format!(
            "{} ({} stars): {}",
            repo["full_name"].as_str().unwrap_or("?"),
            repo["stargazers_count"],
            repo["description"].as_str().unwrap_or("no description"),
        ),
        GetRepo::Moved => "repository moved".to_string(),
        GetRepo::Forbidden(body) => format!("forbidden: {}", body.message),
        GetRepo::NotFound => "repository not found".to_string(),
    }
}

fn repo_request(base_url: &str, owner: &str, repo: &str) -> Result<Request> {
    let url = triage::url::Url::parse(&format!("{base_url}/repos/{owner}/{repo}"))
        .map_err(TransportError::from)?;

    Ok(Request::builder(Method::GET, url)
        .header("Accept", "application/vnd.github+json")
        .timeout(Duration::from_secs(10))
        .build())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> triage::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let owner = args.next().unwrap_or_else(|| "rust-lang".to_string());
    let repo = args.next().unwrap_or_else(|| "rust".to_string());

    let transport = HyperTransport::builder()
        .user_agent("triage-github-demo/0.1.0")
        .with_logging()
        .build();
    let triage = repo_triage()?;

    info!(%owner, %repo, "looking up repository");
    let validated = triage
        .run(&transport, repo_request(GITHUB_API, &owner, &repo)?)
        .await?;

    println!("{}", describe(validated.value()));
    if let Some(errors) = validated.errors() {
        println!("unexpected repository shape: {errors}");
    }

    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    use super::*;

    fn rust_repo() -> serde_json::Value {
        json!({
            "id": 724712,
            "name": "rust",
            "full_name": "rust-lang/rust",
            "description": "Empowering everyone to build reliable and efficient software.",
            "stargazers_count": 100000,
            "forks_count": 13000,
        })
    }

    #[test]
    fn all_outcomes_are_handled() {
        let triage = repo_triage().expect("triage");
        assert!(triage.ensure_exhaustive().is_ok());
        assert_eq!(triage.registry().len(), GetRepo::STATUSES.len());
    }

    #[tokio::test]
    async fn test_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/rust"))
            .and(header("Accept", "application/vnd.github+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rust_repo()))
            .mount(&mock_server)
            .await;

        let triage = repo_triage().expect("triage");
        let request = repo_request(&mock_server.uri(), "rust-lang", "rust").expect("request");
        let validated = triage
            .run(&HyperTransport::new(), request)
            .await
            .expect("dispatch");

        assert!(validated.is_valid());
        assert_eq!(
            describe(validated.value()),
            "rust-lang/rust (100000 stars): Empowering everyone to build reliable and efficient software."
        );
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_reported() {
        let mock_server = MockServer::start().await;

        let mut body = rust_repo();
        body["stargazers_count"] = json!("lots");

        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&mock_server)
            .await;

        let triage = repo_triage().expect("triage");
        let request = repo_request(&mock_server.uri(), "rust-lang", "rust").expect("request");
        let validated = triage
            .run(&HyperTransport::new(), request)
            .await
            .expect("dispatch");

        let errors = validated.errors().expect("validation errors");
        assert_eq!(errors.first().path(), "stargazers_count");
        assert_eq!(validated.into_value(), GetRepo::Found(body));
    }

    #[tokio::test]
    async fn test_forbidden() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/secret"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({"message": "API rate limit exceeded"})),
            )
            .mount(&mock_server)
            .await;

        let triage = repo_triage().expect("triage");
        let request = repo_request(&mock_server.uri(), "octocat", "secret").expect("request");
        let outcome = triage
            .run(&HyperTransport::new(), request)
            .await
            .expect("dispatch")
            .into_value();

        assert_eq!(describe(&outcome), "forbidden: API rate limit exceeded");
    }

    #[tokio::test]
    async fn test_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&mock_server)
            .await;

        let triage = repo_triage().expect("triage");
        let request = repo_request(&mock_server.uri(), "octocat", "nope").expect("request");
        let outcome = triage
            .run(&HyperTransport::new(), request)
            .await
            .expect("dispatch")
            .into_value();

        assert_eq!(outcome, GetRepo::NotFound);
    }
}
