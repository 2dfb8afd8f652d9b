use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Responder, ResponseError};
use prometheus::{Encoder, TextEncoder};

use crate::domain::order::errors::CheckoutError;
use crate::domain::order::workflow::OrderWorkflow;
use crate::metrics::Metrics;
use crate::models::SubmitOrderRequest;

// ============================================================================
// HTTP Surface
// ============================================================================

/// Start the checkout HTTP server
pub async fn run_server(
    workflow: OrderWorkflow,
    metrics: Arc<Metrics>,
    bind_addr: &str,
) -> std::io::Result<()> {
    tracing::info!("🛒 Starting checkout server on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(workflow.clone()))
            .app_data(web::Data::new(metrics.clone()))
            .configure(routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}

/// Route table, shared between the real server and handler tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/orders", web::post().to(submit_order))
        .route("/orders/{order_number}", web::get().to(get_order))
        .route("/health", web::get().to(health_handler))
        .route("/metrics", web::get().to(metrics_handler));
}

async fn submit_order(
    workflow: web::Data<OrderWorkflow>,
    body: web::Json<SubmitOrderRequest>,
) -> Result<HttpResponse, CheckoutError> {
    let receipt = workflow.submit_order(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(receipt))
}

async fn get_order(
    workflow: web::Data<OrderWorkflow>,
    path: web::Path<String>,
) -> Result<HttpResponse, CheckoutError> {
    let view = workflow.get_order(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "order": view })))
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "shop-checkout"
    }))
}

async fn metrics_handler(metrics: web::Data<Arc<Metrics>>) -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(error) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %error, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

// ============================================================================
// Error Mapping
// ============================================================================

impl ResponseError for CheckoutError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InsufficientInventory { .. } => StatusCode::BAD_REQUEST,
            Self::ProductNotFound(_) | Self::OrderNotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Validation(errors) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }))
            }
            Self::ProductNotFound(_) => {
                HttpResponse::NotFound().json(serde_json::json!({ "message": "Product not found" }))
            }
            Self::InsufficientInventory { .. } => HttpResponse::BadRequest()
                .json(serde_json::json!({ "message": "Insufficient inventory" })),
            Self::OrderNotFound(_) => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": "Order not found" }))
            }
            Self::Store(error) => {
                tracing::error!(error = %error, "Order workflow hit a store failure");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "message": "Internal server error" }))
            }
        }
    }
}

// ============================================================================
// Handler Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryStore;
    use crate::mailer::mock::RecordingMailer;
    use crate::models::Product;
    use actix_web::test;

    fn sample_product() -> Product {
        Product {
            id: 1,
            title: "Runner Sneaker".to_string(),
            description: "Lightweight everyday runner".to_string(),
            price: 65.0,
            image_url: "/images/runner.png".to_string(),
            inventory: 2,
            variants: vec!["Black/White".to_string()],
        }
    }

    fn order_body(transaction_type: &str) -> serde_json::Value {
        serde_json::json!({
            "customerData": {
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "phone": "555-010-9999",
                "address": "1 Main St",
                "city": "Springfield",
                "state": "IL",
                "zipCode": "62704"
            },
            "productId": 1,
            "variant": "Black/White",
            "quantity": 1,
            "transactionType": transaction_type
        })
    }

    fn build_workflow() -> (OrderWorkflow, Arc<Metrics>, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::with_product(sample_product()));
        let mailer = Arc::new(RecordingMailer::new());
        let metrics = Arc::new(Metrics::new().unwrap());
        let workflow = OrderWorkflow::new(store.clone(), mailer, metrics.clone());
        (workflow, metrics, store)
    }

    macro_rules! test_app {
        ($workflow:expr, $metrics:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($workflow))
                    .app_data(web::Data::new($metrics))
                    .configure(routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_submit_then_fetch_roundtrip() {
        let (workflow, metrics, store) = build_workflow();
        let app = test_app!(workflow, metrics);

        let request = test::TestRequest::post()
            .uri("/orders")
            .set_json(order_body("1"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["status"], "APPROVED");
        assert_eq!(body["message"], "Order placed successfully");
        let order_number = body["orderNumber"].as_str().unwrap().to_string();
        assert_eq!(store.product_snapshot(1).unwrap().inventory, 1);

        let request = test::TestRequest::get()
            .uri(&format!("/orders/{order_number}"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["order"]["orderNumber"], order_number.as_str());
        assert_eq!(body["order"]["status"], "APPROVED");
        assert_eq!(body["order"]["customer"]["email"], "jane@example.com");
        assert_eq!(body["order"]["product"]["price"], 65.0);
    }

    #[actix_web::test]
    async fn test_validation_errors_are_bad_request() {
        let (workflow, metrics, store) = build_workflow();
        let app = test_app!(workflow, metrics);

        let mut body = order_body("1");
        body["customerData"]["email"] = serde_json::json!("nope");
        let request = test::TestRequest::post()
            .uri("/orders")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["errors"], serde_json::json!(["Valid email is required"]));
        assert_eq!(store.order_count(), 0);
    }

    #[actix_web::test]
    async fn test_unknown_product_is_404() {
        let (workflow, metrics, _store) = build_workflow();
        let app = test_app!(workflow, metrics);

        let mut body = order_body("1");
        body["productId"] = serde_json::json!(42);
        let request = test::TestRequest::post()
            .uri("/orders")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "Product not found");
    }

    #[actix_web::test]
    async fn test_excessive_quantity_is_400() {
        let (workflow, metrics, _store) = build_workflow();
        let app = test_app!(workflow, metrics);

        let mut body = order_body("1");
        body["quantity"] = serde_json::json!(3);
        let request = test::TestRequest::post()
            .uri("/orders")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "Insufficient inventory");
    }

    #[actix_web::test]
    async fn test_unknown_order_is_404() {
        let (workflow, metrics, _store) = build_workflow();
        let app = test_app!(workflow, metrics);

        let request = test::TestRequest::get()
            .uri("/orders/no-such-order")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Order not found");
    }

    #[actix_web::test]
    async fn test_metrics_endpoint_exposes_counters() {
        let (workflow, metrics, _store) = build_workflow();
        let app = test_app!(workflow, metrics);

        let request = test::TestRequest::post()
            .uri("/orders")
            .set_json(order_body("2"))
            .to_request();
        test::call_service(&app, request).await;

        let request = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, request).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("orders_submitted_total"));
        assert!(text.contains("DECLINED"));
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let (workflow, metrics, _store) = build_workflow();
        let app = test_app!(workflow, metrics);

        let request = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["status"], "healthy");
    }
}
