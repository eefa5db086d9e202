use serde::Serialize;

use super::domain::UserType;

/// Tabs rendered by the dashboard once a profile is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    AvailableJobs,
    MyApplications,
    MyJobs,
    CreateJob,
}

impl DashboardTab {
    pub fn value(&self) -> &'static str {
        match self {
            DashboardTab::AvailableJobs => "available-jobs",
            DashboardTab::MyApplications => "my-applications",
            DashboardTab::MyJobs => "my-jobs",
            DashboardTab::CreateJob => "create-job",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::AvailableJobs => "Available Jobs",
            DashboardTab::MyApplications => "My Applications",
            DashboardTab::MyJobs => "My Jobs",
            DashboardTab::CreateJob => "Post Job",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::AvailableJobs => "Available Jobs",
            DashboardTab::MyApplications => "My Applications",
            DashboardTab::MyJobs => "My Job Postings",
            DashboardTab::CreateJob => "Post a New Job",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DashboardTab::AvailableJobs => "Browse and apply to available job postings",
            DashboardTab::MyApplications => "Track your job applications",
            DashboardTab::MyJobs => "Manage your job postings and applications",
            DashboardTab::CreateJob => "Create a job posting to find skilled workers",
        }
    }

    pub fn content(&self) -> TabContent {
        match self {
            DashboardTab::AvailableJobs => TabContent::JobList {
                scope: JobScope::All,
            },
            DashboardTab::MyApplications => TabContent::ApplicationsList,
            DashboardTab::MyJobs => TabContent::JobList {
                scope: JobScope::Mine,
            },
            DashboardTab::CreateJob => TabContent::CreateJob,
        }
    }

    pub fn panel(&self) -> TabPanel {
        TabPanel {
            tab: *self,
            label: self.label(),
            title: self.title(),
            description: self.description(),
            content: self.content(),
        }
    }
}

/// Which job listing a `JobList` panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobScope {
    All,
    Mine,
}

/// List/create component bound to a tab. Each receives the loaded profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "component", rename_all = "snake_case")]
pub enum TabContent {
    JobList { scope: JobScope },
    ApplicationsList,
    CreateJob,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabPanel {
    pub tab: DashboardTab,
    pub label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub content: TabContent,
}

/// Tab set for a role. Manufacturer-only tabs are omitted for workers, not disabled.
pub fn tabs_for(user_type: UserType) -> Vec<DashboardTab> {
    match user_type {
        UserType::Manufacturer => vec![
            DashboardTab::AvailableJobs,
            DashboardTab::MyApplications,
            DashboardTab::MyJobs,
            DashboardTab::CreateJob,
        ],
        UserType::GigWorker => vec![DashboardTab::AvailableJobs, DashboardTab::MyApplications],
    }
}

pub fn default_tab(user_type: UserType) -> DashboardTab {
    match user_type {
        UserType::Manufacturer => DashboardTab::MyJobs,
        UserType::GigWorker => DashboardTab::AvailableJobs,
    }
}
