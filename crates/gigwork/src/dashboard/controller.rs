use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use super::domain::{needs_profile_setup, Profile, SessionContext};
use super::repository::{AuthGateway, PlatformError, ProfileStore};
use super::tabs::{default_tab, tabs_for, DashboardTab, TabPanel};

pub const DASHBOARD_TITLE: &str = "GigWork Dashboard";

/// Client-side destinations the dashboard can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    #[serde(rename = "/auth")]
    Auth,
    #[serde(rename = "/")]
    Landing,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Auth => "/auth",
            Route::Landing => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// Transient user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardHeader {
    pub title: &'static str,
    pub greeting: String,
}

impl DashboardHeader {
    fn for_profile(profile: &Profile) -> Self {
        Self {
            title: DASHBOARD_TITLE,
            greeting: format!("Welcome, {}", profile.name),
        }
    }
}

/// Resolved render states. A client shows its own loading state until the first render arrives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    Redirect {
        to: Route,
    },
    ProfileSetup {
        header: DashboardHeader,
        profile: Profile,
    },
    Tabbed {
        header: DashboardHeader,
        default_tab: DashboardTab,
        tabs: Vec<TabPanel>,
        profile: Profile,
    },
    Unavailable {
        title: &'static str,
        message: String,
    },
}

impl DashboardView {
    pub fn for_profile(profile: Profile) -> Self {
        let header = DashboardHeader::for_profile(&profile);
        if needs_profile_setup(&profile) {
            return DashboardView::ProfileSetup { header, profile };
        }

        let tabs = tabs_for(profile.user_type)
            .iter()
            .map(DashboardTab::panel)
            .collect();
        DashboardView::Tabbed {
            header,
            default_tab: default_tab(profile.user_type),
            tabs,
            profile,
        }
    }
}

/// Outcome of one load: the view plus any side effects the client should apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRender {
    pub view: DashboardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SignOutOutcome {
    Navigate { to: Route },
    Failed { toast: Toast },
}

/// Drives the dashboard data flow against the hosted auth and data services.
pub struct DashboardController<S, A> {
    store: Arc<S>,
    auth: Arc<A>,
}

impl<S, A> Clone for DashboardController<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            auth: Arc::clone(&self.auth),
        }
    }
}

impl<S, A> DashboardController<S, A>
where
    S: ProfileStore + 'static,
    A: AuthGateway + 'static,
{
    pub fn new(store: Arc<S>, auth: Arc<A>) -> Self {
        Self { store, auth }
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Resolve the dashboard for a session. Anonymous sessions redirect without touching the store.
    pub async fn load(&self, session: &SessionContext) -> DashboardRender {
        let Some(user) = session.user.as_ref() else {
            debug!("no session, redirecting to auth");
            return DashboardRender {
                view: DashboardView::Redirect { to: Route::Auth },
                navigate_to: Some(Route::Auth),
                toast: None,
            };
        };

        match self.store.fetch_profile(&user.id).await {
            Ok(profile) => DashboardRender {
                view: DashboardView::for_profile(profile),
                navigate_to: None,
                toast: None,
            },
            Err(err) => {
                error!(user_id = %user.id, error = %err, "error fetching profile");
                DashboardRender {
                    view: DashboardView::Unavailable {
                        title: DASHBOARD_TITLE,
                        message: "Profile could not be loaded".to_string(),
                    },
                    navigate_to: None,
                    toast: Some(Toast::error("Failed to fetch profile")),
                }
            }
        }
    }

    /// Re-fetch after the setup flow saved detail records.
    pub async fn reload(&self, session: &SessionContext) -> DashboardRender {
        self.load(session).await
    }

    pub async fn sign_out(&self, session: &SessionContext) -> SignOutOutcome {
        let result = match session.access_token.as_deref() {
            Some(token) => self.auth.sign_out(token).await,
            None => Err(PlatformError::MissingSession),
        };

        match result {
            Ok(()) => {
                if let Some(user) = session.user.as_ref() {
                    info!(user_id = %user.id, "signed out");
                }
                SignOutOutcome::Navigate { to: Route::Landing }
            }
            Err(err) => SignOutOutcome::Failed {
                toast: Toast::error(err.to_string()),
            },
        }
    }

    /// Reload whenever the session changes and forward each render.
    ///
    /// Loads run one at a time. Sessions that change while a load is in flight collapse into the
    /// latest value, so only the newest session gets the next render.
    pub async fn follow(
        &self,
        mut sessions: watch::Receiver<SessionContext>,
        renders: mpsc::Sender<DashboardRender>,
    ) {
        loop {
            let session = sessions.borrow_and_update().clone();
            let render = self.load(&session).await;
            if renders.send(render).await.is_err() {
                debug!("render receiver dropped, stopping session follower");
                return;
            }
            if sessions.changed().await.is_err() {
                return;
            }
        }
    }
}
