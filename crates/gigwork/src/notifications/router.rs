use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::gateway::MessagingGateway;
use super::relay::NotificationRelay;

pub const RELAY_PATH: &str = "/functions/v1/send-whatsapp-notification";

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub(crate) fn cors_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ),
    ]
}

/// Router exposing the relay with its preflight handler.
pub fn notification_router<G>(relay: Arc<NotificationRelay<G>>) -> Router
where
    G: MessagingGateway + 'static,
{
    Router::new()
        .route(
            RELAY_PATH,
            post(relay_handler::<G>).options(preflight_handler),
        )
        .with_state(relay)
}

pub(crate) async fn preflight_handler() -> Response {
    (StatusCode::OK, cors_headers()).into_response()
}

pub(crate) async fn relay_handler<G>(
    State(relay): State<Arc<NotificationRelay<G>>>,
    body: Bytes,
) -> Response
where
    G: MessagingGateway + 'static,
{
    let envelope = relay.relay_raw(&body).await;
    (StatusCode::OK, cors_headers(), Json(envelope)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::gateway::{DeliveryError, OutboundMessage};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    #[derive(Default)]
    struct CountingGateway {
        calls: AtomicUsize,
        reject: bool,
    }

    #[async_trait]
    impl MessagingGateway for CountingGateway {
        async fn send(&self, _message: &OutboundMessage) -> Result<Value, DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                Err(DeliveryError::Rejected {
                    status: 503,
                    body: "maintenance".to_string(),
                })
            } else {
                Ok(json!({ "messages": [{ "id": "wamid.9" }] }))
            }
        }
    }

    fn router_with(gateway: Arc<CountingGateway>) -> Router {
        notification_router(Arc::new(NotificationRelay::new(gateway, "+91")))
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body")
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
    }

    #[tokio::test]
    async fn preflight_returns_empty_body_without_delivery() {
        let gateway = Arc::new(CountingGateway::default());
        let router = router_with(gateway.clone());

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(RELAY_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert!(body_bytes(response).await.is_empty());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_delivery_still_answers_ok() {
        let gateway = Arc::new(CountingGateway {
            reject: true,
            ..CountingGateway::default()
        });
        let router = router_with(gateway.clone());

        let response = router
            .oneshot(
                Request::post(RELAY_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "manufacturerPhone": "9876543210",
                            "workerName": "Ravi Kumar",
                            "jobTitle": "Machine Operator"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let payload: Value = serde_json::from_slice(&body_bytes(response).await).expect("json");
        assert_eq!(payload["success"], json!(true));
        assert_eq!(payload["demo"], json!(true));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_json_answers_ok_with_error_detail() {
        let gateway = Arc::new(CountingGateway::default());
        let router = router_with(gateway.clone());

        let response = router
            .oneshot(
                Request::post(RELAY_PATH)
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload: Value = serde_json::from_slice(&body_bytes(response).await).expect("json");
        assert_eq!(payload["success"], json!(true));
        assert_eq!(payload["message"], json!("Notification processed (demo mode)"));
        assert!(payload["error"].is_string());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }
}
