//! Fixed report content that does not come from the analysis

use serde::{Deserialize, Serialize};

/// Where a tenant can get real legal help
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryResource {
    pub name: String,
    /// Contact or web address, if any
    pub contact: Option<String>,
}

impl AdvisoryResource {
    pub fn new(name: impl Into<String>, contact: Option<&str>) -> Self {
        Self {
            name: name.into(),
            contact: contact.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub title: String,
    pub subtitle: String,
    /// Region named in the "<region> Standard" label of financial findings
    pub region: String,
    pub resources: Vec<AdvisoryResource>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Lease Analysis Report".to_string(),
            subtitle: "AI Lease Checker".to_string(),
            region: "Ontario".to_string(),
            resources: vec![
                AdvisoryResource::new("UOttawa Legal Aid Clinic", None),
                AdvisoryResource::new(
                    "Ontario Landlord and Tenant Board",
                    Some("tribunalsontario.ca/ltb"),
                ),
                AdvisoryResource::new("Community Legal Services Ottawa", Some("clsottawa.ca")),
            ],
        }
    }
}

impl ReportOptions {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_resources(mut self, resources: Vec<AdvisoryResource>) -> Self {
        self.resources = resources;
        self
    }
}
