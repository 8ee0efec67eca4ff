//! Raw team-hierarchy payload from `employee/team/hierarchy`.
//!
//! This shape belongs to the backend. It is redundant: a regional manager
//! team can be listed both under `regionalManagerTeams` and inside
//! `avpTeams[].managers`, and the latter copy carries no field officers.

use serde::{Deserialize, Serialize};

use super::employee::Employee;
use super::lenient;
use super::team::{AvpRef, TeamType};

/// Top-level hierarchy response. Every array defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HierarchyResponse {
    #[serde(deserialize_with = "lenient::list")]
    pub avp_teams: Vec<AvpGroup>,
    #[serde(deserialize_with = "lenient::list")]
    pub regional_manager_teams: Vec<TeamRecord>,
    #[serde(deserialize_with = "lenient::list")]
    pub coordinator_teams: Vec<TeamRecord>,
}

impl HierarchyResponse {
    pub fn is_empty(&self) -> bool {
        self.avp_teams.is_empty()
            && self.regional_manager_teams.is_empty()
            && self.coordinator_teams.is_empty()
    }
}

/// An AVP together with the manager teams reporting to them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvpGroup {
    pub avp: AvpRef,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub avp_id: Option<i64>,
    #[serde(deserialize_with = "lenient::list")]
    pub managers: Vec<TeamRecord>,
}

impl AvpGroup {
    /// The group's AVP as a reference, folding a bare `avpId` in.
    pub fn avp_ref(&self) -> AvpRef {
        match (&self.avp, self.avp_id) {
            (AvpRef::None, Some(id)) => AvpRef::ById(id),
            (avp, _) => avp.clone(),
        }
    }
}

/// One manager-led team inside the hierarchy payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamRecord {
    #[serde(deserialize_with = "lenient::opt_id")]
    pub team_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub team_type: Option<String>,
    pub manager: Option<Employee>,
    pub office_manager: Option<Employee>,
    pub avp: AvpRef,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub avp_id: Option<i64>,
    #[serde(deserialize_with = "lenient::list")]
    pub field_officers: Vec<Employee>,
}

impl TeamRecord {
    /// `teamId`, falling back to `id`.
    pub fn key(&self) -> Option<i64> {
        self.team_id.or(self.id)
    }

    /// `manager`, falling back to `officeManager`.
    pub fn leader(&self) -> Option<&Employee> {
        self.manager.as_ref().or(self.office_manager.as_ref())
    }

    pub fn team_type(&self) -> Option<TeamType> {
        self.team_type.as_deref().and_then(TeamType::parse)
    }
}
