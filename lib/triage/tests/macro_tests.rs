//! Integration tests for the `StatusOutcomes` derive macro.

#![allow(missing_docs)]

use assert2::{check, let_assert};
use triage::prelude::*;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Repo {
    id: u64,
    full_name: String,
}

#[derive(Debug, PartialEq, Eq, StatusOutcomes)]
enum GetRepo {
    #[status(200)]
    Found(Repo),
    #[status(404)]
    Missing,
    #[status(403)]
    RateLimited { reset: Option<String> },
}

#[derive(Debug, StatusOutcomes)]
enum Page<T> {
    #[status(200)]
    Items(Vec<T>),
    #[status(204)]
    Empty,
}

#[test]
fn test_statuses_in_declaration_order() {
    assert_eq!(GetRepo::STATUSES, &[200, 404, 403]);
    assert_eq!(Page::<u8>::STATUSES, &[200, 204]);
}

#[test]
fn test_status_of_each_variant() {
    let repo = Repo {
        id: 1,
        full_name: "octo/hello".to_string(),
    };
    assert_eq!(GetRepo::Found(repo).status(), 200);
    assert_eq!(GetRepo::Missing.status(), 404);
    assert_eq!(GetRepo::RateLimited { reset: None }.status(), 403);
    assert_eq!(Page::<String>::Empty.status(), 204);
    assert_eq!(Page::Items(vec![1, 2]).status(), 200);
}

fn repo_triage() -> triage::Result<Triage<GetRepo>> {
    Triage::for_outcomes::<GetRepo>()
        .handle_json(200, GetRepo::Found)?
        .handle(404, |_| GetRepo::Missing)?
        .handle(403, |payload: Payload| GetRepo::RateLimited {
            reset: payload.as_text().map(str::to_string),
        })
}

#[tokio::test]
async fn test_declared_outcomes_dispatch() {
    let mock_server = MockServer::start().await;

    let repo = Repo {
        id: 42,
        full_name: "octo/triage".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/repos/octo/triage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&repo))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let triage = repo_triage().expect("triage");
    let transport = HyperTransport::new();

    let found = triage
        .run(
            &transport,
            Request::get(&format!("{}/repos/octo/triage", mock_server.uri())).expect("url"),
        )
        .await
        .expect("dispatch")
        .into_value();
    check!(found == GetRepo::Found(repo));

    let missing = triage
        .run(
            &transport,
            Request::get(&format!("{}/repos/octo/gone", mock_server.uri())).expect("url"),
        )
        .await
        .expect("dispatch")
        .into_value();
    check!(missing.status() == 404);
}

#[tokio::test]
async fn test_uncovered_outcome_stops_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let triage = Triage::for_outcomes::<GetRepo>()
        .handle(404, |_| GetRepo::Missing)
        .expect("register");

    let err = triage
        .run(
            &HyperTransport::new(),
            Request::get(&format!("{}/repos/octo/triage", mock_server.uri())).expect("url"),
        )
        .await
        .expect_err("should fail");

    let_assert!(Error::NonExhaustive { missing } = err);
    check!(missing == vec![200, 403]);
}

#[test]
fn test_undeclared_handler_is_rejected() {
    let err = Triage::for_outcomes::<GetRepo>()
        .handle(500, |_| GetRepo::Missing)
        .expect_err("500 is not declared");

    insta::assert_snapshot!(err.to_string(), @"status 500 is not a declared outcome");
}
