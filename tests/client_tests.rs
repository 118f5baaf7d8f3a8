use product_catalog::client::views::{
    delete_product, submit_create, submit_update, DeleteOutcome, DetailView, FormOutcome,
    ListView, LoadState, ProductForm, Route,
};
use product_catalog::client::{
    ClientError, DataSource, FallbackSource, Origin, RemoteSource, StaticSampleSource,
};
use product_catalog::validation::ValidationRules;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Nothing listens here, so every request fails before a response arrives.
const UNREACHABLE_API: &str = "http://127.0.0.1:1/api";

fn product_json(id: i64, name: &str, quantity: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "price": "49.99",
        "quantity": quantity,
        "category": "Livros",
        "created_at": "2025-01-01T10:00:00Z",
        "updated_at": "2025-01-01T10:00:00Z"
    })
}

async fn api() -> (MockServer, RemoteSource) {
    let server = MockServer::start().await;
    let remote = RemoteSource::new(format!("{}/api", server.uri()));
    (server, remote)
}

#[tokio::test]
async fn list_view_shows_remote_products() {
    let (server, remote) = api().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Clean Code", 50),
            product_json(2, "Refactoring", 10),
        ])))
        .mount(&server)
        .await;

    let source = FallbackSource::with_samples(remote);
    let mut view = ListView::new();
    view.load(&source).await;

    assert_eq!(view.products().len(), 2);
    assert_eq!(view.products()[0].price, dec!(49.99));
    assert!(view.state().warning().is_none());
    match view.state() {
        LoadState::Ready(sourced) => assert_eq!(sourced.origin, Origin::Remote),
        other => panic!("unexpected state {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_api_falls_back_to_samples_with_warning() {
    let source = FallbackSource::with_samples(RemoteSource::new(UNREACHABLE_API));
    let mut view = ListView::new();
    view.load(&source).await;

    assert_eq!(view.products().len(), 10);
    assert!(view.state().warning().is_some());
    match view.state() {
        LoadState::Ready(sourced) => assert_eq!(sourced.origin, Origin::Sample),
        other => panic!("unexpected state {:?}", other),
    }

    view.retry(&source).await;
    assert_eq!(view.products().len(), 10);
}

#[tokio::test]
async fn disabled_fallback_reports_the_transport_error() {
    let source =
        FallbackSource::with_samples(RemoteSource::new(UNREACHABLE_API)).enabled(false);
    let err = source.list().await.unwrap_err();
    assert!(err.is_transport());

    let mut view = ListView::new();
    view.load(&source).await;
    assert!(matches!(view.state(), LoadState::Failed(_)));
    assert!(view.products().is_empty());
}

#[tokio::test]
async fn detail_view_falls_back_for_known_sample_ids() {
    let source = FallbackSource::with_samples(RemoteSource::new(UNREACHABLE_API));
    let mut view = DetailView::new(3);
    view.load(&source).await;
    assert_eq!(view.product().map(|p| p.name.as_str()), Some("Clean Code"));
    assert!(view.state().warning().is_some());
    assert_eq!(view.edit_route(), Route::Edit(3));
}

#[tokio::test]
async fn not_found_is_not_masked_by_samples() {
    let (server, remote) = api().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Producto 3 no encontrado"})),
        )
        .mount(&server)
        .await;

    let source = FallbackSource::with_samples(remote);
    assert!(matches!(source.get(3).await, Err(ClientError::NotFound(3))));

    let mut view = DetailView::new(3);
    view.load(&source).await;
    assert!(matches!(view.state(), LoadState::Failed(_)));
}

#[tokio::test]
async fn create_surfaces_server_validation_messages_verbatim() {
    let (server, remote) = api().await;
    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": "Los datos enviados no son válidos",
            "errors": {"name": ["ya existe un producto con ese nombre"]}
        })))
        .mount(&server)
        .await;

    let form = ProductForm {
        name: "Clean Code".to_string(),
        price: "49.99".to_string(),
        quantity: "50".to_string(),
        category: "Livros".to_string(),
        ..Default::default()
    };
    match submit_create(&remote, &ValidationRules::default(), &form).await {
        FormOutcome::Invalid(errors) => assert_eq!(
            errors.get("name"),
            Some(&["ya existe un producto con ese nombre".to_string()][..])
        ),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn invalid_form_is_never_sent() {
    let (server, remote) = api().await;
    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let form = ProductForm {
        name: "X".to_string(),
        price: "0".to_string(),
        quantity: "5".to_string(),
        ..Default::default()
    };
    let outcome = submit_create(&remote, &ValidationRules::default(), &form).await;
    assert!(matches!(outcome, FormOutcome::Invalid(errors) if errors.contains("price")));
}

#[tokio::test]
async fn successful_update_returns_to_the_list() {
    let (server, remote) = api().await;
    Mock::given(method("PUT"))
        .and(path("/api/products/1"))
        .and(body_partial_json(json!({"quantity": 40, "category": "Livros"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(1, "Clean Code", 40)))
        .mount(&server)
        .await;

    let form = ProductForm {
        name: "Clean Code".to_string(),
        price: "49.99".to_string(),
        quantity: "40".to_string(),
        category: "Livros".to_string(),
        ..Default::default()
    };
    match submit_update(&remote, &ValidationRules::default(), 1, &form).await {
        FormOutcome::Saved { product, next } => {
            assert_eq!(product.quantity, 40);
            assert_eq!(next, Route::List);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let (server, remote) = api().await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Producto eliminado", "id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(delete_product(&remote, 1, false).await, DeleteOutcome::Cancelled);
    assert_eq!(
        delete_product(&remote, 1, true).await,
        DeleteOutcome::Deleted { next: Route::List }
    );
}

#[tokio::test]
async fn failed_delete_still_navigates_away() {
    let remote = RemoteSource::new(UNREACHABLE_API);
    match delete_product(&remote, 1, true).await {
        DeleteOutcome::NavigatedAway { next, warning } => {
            assert_eq!(next, Route::List);
            assert!(!warning.is_empty());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn server_errors_keep_status_and_message() {
    let (server, remote) = api().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "Error al acceder a la base de datos"})),
        )
        .mount(&server)
        .await;

    match remote.list().await {
        Err(ClientError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Error al acceder a la base de datos");
        }
        other => panic!("unexpected result {:?}", other),
    }

    // A server failure is not a connectivity problem: no sample data.
    let source = FallbackSource::with_samples(remote);
    assert!(source.list().await.is_err());
}

#[tokio::test]
async fn sample_source_matches_seed_catalog() {
    let products = StaticSampleSource::new().list().await.unwrap();
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
}
