//! Dashboard data flow: session gate, profile fetch, setup gating, and the role-driven tab set.
//!
//! Rendering is left to the client. This module produces the view-model a client renders and
//! the navigation/toast side effects it should apply.

pub mod controller;
pub mod domain;
pub mod repository;
pub mod router;
pub mod tabs;

#[cfg(test)]
mod tests;

pub use controller::{
    DashboardController, DashboardHeader, DashboardRender, DashboardView, Route, SignOutOutcome,
    Toast, ToastVariant,
};
pub use domain::{
    needs_profile_setup, GigWorkerDetails, ManufacturerDetails, Profile, SessionContext,
    SessionUser, UserId, UserType,
};
pub use repository::{AuthGateway, PlatformError, ProfileStore};
pub use router::dashboard_router;
pub use tabs::{default_tab, tabs_for, DashboardTab, JobScope, TabContent, TabPanel};
