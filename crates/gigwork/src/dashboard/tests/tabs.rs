use crate::dashboard::domain::{needs_profile_setup, Profile, UserType};
use crate::dashboard::tabs::{default_tab, tabs_for, DashboardTab, JobScope, TabContent};
use serde_json::json;

use super::common::*;

#[test]
fn worker_tab_set_excludes_manufacturer_tabs() {
    let tabs = tabs_for(UserType::GigWorker);
    assert!(!tabs.contains(&DashboardTab::MyJobs));
    assert!(!tabs.contains(&DashboardTab::CreateJob));
    assert_eq!(default_tab(UserType::GigWorker), DashboardTab::AvailableJobs);
}

#[test]
fn manufacturer_tab_set_includes_posting_tabs() {
    let tabs = tabs_for(UserType::Manufacturer);
    assert_eq!(tabs.len(), 4);
    assert!(tabs.contains(&default_tab(UserType::Manufacturer)));
    assert_eq!(default_tab(UserType::Manufacturer).value(), "my-jobs");
}

#[test]
fn my_jobs_panel_scopes_job_list_to_owner() {
    assert_eq!(
        DashboardTab::MyJobs.content(),
        TabContent::JobList {
            scope: JobScope::Mine
        }
    );
    assert_eq!(
        DashboardTab::AvailableJobs.content(),
        TabContent::JobList {
            scope: JobScope::All
        }
    );
    assert_eq!(DashboardTab::CreateJob.panel().title, "Post a New Job");
}

#[test]
fn panel_serializes_component_binding() {
    let value = serde_json::to_value(DashboardTab::MyJobs.panel()).expect("serializes");
    assert_eq!(value["tab"], json!("my-jobs"));
    assert_eq!(value["content"], json!({ "component": "job_list", "scope": "mine" }));
}

#[test]
fn setup_needed_only_when_both_collections_empty() {
    assert!(needs_profile_setup(&blank_profile("u", UserType::Manufacturer)));
    assert!(!needs_profile_setup(&manufacturer_profile("u")));
    assert!(!needs_profile_setup(&worker_profile("u")));

    let mut crossed = blank_profile("u", UserType::Manufacturer);
    crossed.gig_worker_details = worker_profile("u").gig_worker_details;
    assert!(!needs_profile_setup(&crossed));
}

#[test]
fn profile_row_accepts_null_and_single_embedded_relations() {
    let row = json!({
        "id": "p-1",
        "user_id": "u-1",
        "name": "Asha Patel",
        "user_type": "manufacturer",
        "created_at": "2024-05-01T10:00:00Z",
        "manufacturer_details": { "id": "m-1", "company_name": "Patel Textiles" },
        "gig_worker_details": null
    });

    let profile: Profile = serde_json::from_value(row).expect("row decodes");
    assert_eq!(profile.manufacturer_details.len(), 1);
    assert_eq!(
        profile.manufacturer_details[0].attributes["company_name"],
        json!("Patel Textiles")
    );
    assert!(profile.gig_worker_details.is_empty());
    assert!(profile.is_manufacturer());
}

#[test]
fn profile_row_rejects_unknown_role() {
    let row = json!({
        "id": "p-2",
        "user_id": "u-2",
        "name": "Someone",
        "user_type": "admin",
        "manufacturer_details": [],
        "gig_worker_details": []
    });

    assert!(serde_json::from_value::<Profile>(row).is_err());
}
