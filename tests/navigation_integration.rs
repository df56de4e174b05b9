//! Boundary state across page views.

use boundary::{BoundaryError, Catalog, FetchFailure, PageBoundary, Rendered, Router, Translator};
use portal_tests::{client_for, mock_graphql};
use serde_json::{json, Value};
use std::rc::Rc;
use std::time::Duration;
use wiremock::ResponseTemplate;

fn english() -> Rc<dyn Translator> {
    Rc::new(Catalog::english())
}

#[test]
fn test_boundary_requires_router() {
    let err = PageBoundary::page(None, english()).unwrap_err();
    assert!(matches!(err, BoundaryError::MissingRouter));
}

#[test]
fn test_error_persists_until_navigation() {
    let router = Router::new("/!v/abc");
    let boundary = PageBoundary::page(Some(&router), english()).unwrap();

    boundary
        .render(|| Err::<(), _>(FetchFailure::network("offline")))
        .unwrap();

    // Re-rendering the same page view keeps the same error.
    for _ in 0..2 {
        let rendered = boundary.render(|| Ok::<_, FetchFailure>("video")).unwrap();
        assert!(rendered.is_fallback());
    }
    assert_eq!(boundary.current_error(), Some(FetchFailure::network("offline")));

    router.navigate("/!v/def");
    assert_eq!(boundary.current_error(), None);
    assert_eq!(
        boundary.render(|| Ok::<_, FetchFailure>("video")).unwrap(),
        Rendered::Content("video")
    );
}

#[test]
fn test_each_boundary_owns_its_state() {
    let router = Router::new("/");
    let first = PageBoundary::page(Some(&router), english()).unwrap();
    let second = PageBoundary::page(Some(&router), english()).unwrap();

    first.catch(FetchFailure::server(500, None)).unwrap();
    assert!(first.has_error());
    assert!(!second.has_error());

    router.navigate("/about");
    assert!(!first.has_error());
}

#[tokio::test]
async fn test_navigation_to_failing_page_shows_new_error() {
    let failing = mock_graphql(ResponseTemplate::new(503)).await;
    let working = mock_graphql(
        ResponseTemplate::new(200).set_body_json(json!({ "data": { "realm": { "name": "Lectures" } } })),
    )
    .await;

    let router = Router::new("/");
    let boundary = PageBoundary::page(Some(&router), english()).unwrap();

    let rendered = boundary
        .render_async(client_for(&failing).query_value("{ realm { name } }", Value::Null))
        .await
        .unwrap();
    assert!(rendered.is_fallback());

    router.navigate("/lectures");
    let rendered = boundary
        .render_async(client_for(&working).query_value("{ realm { name } }", Value::Null))
        .await
        .unwrap();
    assert_eq!(rendered.content().unwrap()["realm"]["name"], "Lectures");

    router.navigate("/broken");
    boundary
        .render_async(client_for(&failing).query_value("{ realm { name } }", Value::Null))
        .await
        .unwrap();
    assert_eq!(boundary.current_error(), Some(FetchFailure::server(503, None)));
}

#[tokio::test]
async fn test_slow_failure_after_navigation_stays_with_old_page() {
    let slow = mock_graphql(ResponseTemplate::new(503).set_delay(Duration::from_millis(300))).await;
    let client = client_for(&slow);

    let router = Router::new("/!v/slow");
    let boundary = PageBoundary::page(Some(&router), english()).unwrap();

    let pending = boundary.render_async(client.query_value("{ realm { name } }", Value::Null));
    let navigate = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        router.navigate("/about");
    };
    let (rendered, ()) = tokio::join!(pending, navigate);

    // The slow page still sees its own failure, the new page does not.
    assert!(rendered.unwrap().is_fallback());
    assert_eq!(router.current_path(), "/about");
    assert_eq!(boundary.current_error(), None);
    assert_eq!(
        boundary.render(|| Ok::<_, FetchFailure>("about")).unwrap(),
        Rendered::Content("about")
    );
}

#[tokio::test]
async fn test_overlapping_requests_share_one_error() {
    let fast = mock_graphql(ResponseTemplate::new(503)).await;
    let slow = mock_graphql(ResponseTemplate::new(500).set_delay(Duration::from_millis(200))).await;

    let router = Router::new("/");
    let boundary = PageBoundary::page(Some(&router), english()).unwrap();

    let (fast_client, slow_client) = (client_for(&fast), client_for(&slow));
    let (first, second) = tokio::join!(
        boundary.render_async(fast_client.query_value("{ realm { name } }", Value::Null)),
        boundary.render_async(slow_client.query_value("{ realm { name } }", Value::Null)),
    );

    let first = first.unwrap().fallback().unwrap();
    let second = second.unwrap().fallback().unwrap();
    assert_eq!(first, second);
    assert_eq!(boundary.current_error(), Some(FetchFailure::server(503, None)));
}
