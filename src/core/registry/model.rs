use serde::{Deserialize, Serialize};

/// How strongly a mod wants to be present on one side.
///
/// Wire values are the registry's lowercase strings; anything the
/// registry adds later parses as `Unknown` instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    Required,
    Optional,
    Unsupported,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SupportLevel {
    /// Whether this side wants the mod at all.
    pub fn is_wanted(self) -> bool {
        matches!(self, SupportLevel::Required | SupportLevel::Optional)
    }
}

impl std::fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupportLevel::Required => write!(f, "required"),
            SupportLevel::Optional => write!(f, "optional"),
            SupportLevel::Unsupported => write!(f, "unsupported"),
            SupportLevel::Unknown => write!(f, "unknown"),
        }
    }
}

/// Subset of the registry's version record returned by a hash lookup.
///
/// The payload carries far more (files, dependencies, changelogs); only
/// the fields feeding classification are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionMetadata {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub client_side: SupportLevel,
    #[serde(default)]
    pub server_side: SupportLevel,
}

/// Subset of the registry's project record.
///
/// Side fields are optional: when the project payload carries them they
/// override the version-level values, otherwise those stay in force.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub client_side: Option<SupportLevel>,
    #[serde(default)]
    pub server_side: Option<SupportLevel>,
}

impl VersionMetadata {
    /// Effective (client, server) support after merging an optional
    /// project record. Project fields win where present.
    pub fn merged_sides(&self, project: Option<&ProjectMetadata>) -> (SupportLevel, SupportLevel) {
        let client = project
            .and_then(|p| p.client_side)
            .unwrap_or(self.client_side);
        let server = project
            .and_then(|p| p.server_side)
            .unwrap_or(self.server_side);
        (client, server)
    }
}
