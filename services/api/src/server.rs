use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gigwork::config::AppConfig;
use gigwork::dashboard::DashboardController;
use gigwork::error::AppError;
use gigwork::notifications::{NotificationRelay, WhatsAppCloudClient};
use gigwork::platform::PlatformClient;
use gigwork::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.whatsapp.uses_placeholder_sender() {
        warn!(
            endpoint = %config.whatsapp.messages_url(),
            "WHATSAPP_PHONE_NUMBER_ID is not set; deliveries will be rejected and masked"
        );
    }

    let messaging = Arc::new(WhatsAppCloudClient::new(&config.whatsapp));
    let relay = Arc::new(NotificationRelay::new(
        messaging,
        config.whatsapp.default_country_code.clone(),
    ));

    let platform = PlatformClient::new(&config.platform);
    let dashboard = Arc::new(DashboardController::new(
        Arc::new(platform.profiles()),
        Arc::new(platform.auth()),
    ));

    let app = with_service_routes(relay, dashboard)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "gigwork api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
