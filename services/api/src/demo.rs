use crate::infra::{sample_profile, InMemoryAuth, InMemoryProfileStore, RecordingGateway};
use clap::{Args, ValueEnum};
use gigwork::config::AppConfig;
use gigwork::dashboard::{
    DashboardController, DashboardRender, DashboardView, SessionContext, SessionUser,
    SignOutOutcome, UserId, UserType,
};
use gigwork::error::AppError;
use gigwork::notifications::{
    MessagingGateway, NotificationRelay, NotificationRequest, WhatsAppCloudClient,
};
use gigwork::telemetry;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum DemoRole {
    #[default]
    Manufacturer,
    GigWorker,
}

impl From<DemoRole> for UserType {
    fn from(value: DemoRole) -> Self {
        match value {
            DemoRole::Manufacturer => UserType::Manufacturer,
            DemoRole::GigWorker => UserType::GigWorker,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Role of the signed-in demo user
    #[arg(long, value_enum, default_value_t = DemoRole::Manufacturer)]
    pub(crate) user_type: DemoRole,
    /// Leave the role's detail record empty so the setup flow is shown
    #[arg(long)]
    pub(crate) incomplete: bool,
    /// Simulate a messaging provider outage during the relay step
    #[arg(long)]
    pub(crate) fail_delivery: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct NotifyArgs {
    /// Manufacturer phone number; numbers without '+' get the default country code
    #[arg(long, required_unless_present = "payload")]
    pub(crate) phone: Option<String>,
    /// Applicant name
    #[arg(long, required_unless_present = "payload")]
    pub(crate) worker: Option<String>,
    /// Job title the worker applied to
    #[arg(long, required_unless_present = "payload")]
    pub(crate) job: Option<String>,
    /// Optional note from the applicant
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Raw JSON request body, as the HTTP relay would receive it
    #[arg(long, conflicts_with_all = ["phone", "worker", "job", "message"])]
    pub(crate) payload: Option<String>,
}

impl NotifyArgs {
    fn into_request(self) -> Result<NotificationRequest, AppError> {
        if let Some(raw) = self.payload {
            return Ok(serde_json::from_str(&raw)?);
        }

        Ok(NotificationRequest {
            manufacturer_phone: self.phone.unwrap_or_default(),
            worker_name: self.worker.unwrap_or_default(),
            job_title: self.job.unwrap_or_default(),
            application_message: self.message,
        })
    }
}

/// Send one notification without masking: operators see the real provider outcome.
pub(crate) async fn run_notify(args: NotifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    let request = args.into_request()?;
    let client = Arc::new(WhatsAppCloudClient::new(&config.whatsapp));
    let relay = NotificationRelay::new(
        client.clone(),
        config.whatsapp.default_country_code.clone(),
    );
    let message = relay.outbound_message(&request);

    println!("Sending to {} via {}", message.to, client.endpoint());
    let response = client.send(&message).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&response).unwrap_or_else(|_| response.to_string())
    );
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        user_type,
        incomplete,
        fail_delivery,
    } = args;
    let user_type = UserType::from(user_type);

    let store = Arc::new(InMemoryProfileStore::default());
    let auth = Arc::new(InMemoryAuth::default());
    let user = SessionUser {
        id: UserId("demo-user".to_string()),
        email: Some("demo@gigwork.example".to_string()),
    };
    store.insert(sample_profile(&user.id, user_type, !incomplete));
    auth.issue("demo-token", user.clone());

    let controller = DashboardController::new(store, auth);

    println!("GigWork demo ({} profile)", user_type.label());

    println!("\nAnonymous visit");
    print_render(&controller.load(&SessionContext::anonymous()).await);

    let session = SessionContext::authenticated(user, "demo-token");
    println!("\nSigned-in visit");
    print_render(&controller.load(&session).await);

    let gateway = if fail_delivery {
        RecordingGateway::unavailable()
    } else {
        RecordingGateway::default()
    };
    let gateway = Arc::new(gateway);
    let relay = NotificationRelay::new(gateway.clone(), "+91");
    let request = NotificationRequest {
        manufacturer_phone: "9876543210".to_string(),
        worker_name: "Ravi Kumar".to_string(),
        job_title: "CNC Machine Operator".to_string(),
        application_message: None,
    };

    println!("\nApplication notification");
    let envelope = relay.relay(&request).await;
    for message in gateway.outbox() {
        println!("- to {}:", message.to);
        for line in message.text.body.lines() {
            println!("    {line}");
        }
    }
    println!(
        "- relay response: {}",
        serde_json::to_string(&envelope).unwrap_or_default()
    );

    println!("\nSign out");
    match controller.sign_out(&session).await {
        SignOutOutcome::Navigate { to } => println!("- navigate to {}", to.path()),
        SignOutOutcome::Failed { toast } => println!("- error: {}", toast.description),
    }

    Ok(())
}

fn print_render(render: &DashboardRender) {
    match &render.view {
        DashboardView::Redirect { to } => println!("- redirect to {}", to.path()),
        DashboardView::ProfileSetup { header, .. } => {
            println!("- {} | {}", header.title, header.greeting);
            println!("- profile setup required");
        }
        DashboardView::Tabbed {
            header,
            default_tab,
            tabs,
            ..
        } => {
            println!("- {} | {}", header.title, header.greeting);
            for panel in tabs {
                let marker = if panel.tab == *default_tab { "*" } else { " " };
                println!("  {marker} {} ({})", panel.label, panel.description);
            }
        }
        DashboardView::Unavailable { message, .. } => println!("- unavailable: {message}"),
    }

    if let Some(toast) = &render.toast {
        println!("- toast [{}]: {}", toast.title, toast.description);
    }
}
