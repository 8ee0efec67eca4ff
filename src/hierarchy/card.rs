//! Team cards: the flat view model produced from the raw hierarchy.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::models::{CategoryRole, Employee, TeamCategory, TeamType};

/// What a card stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    /// A team the backend knows about. `source` is the list it was read
    /// from, `None` for teams fetched outside the hierarchy.
    Team {
        team_id: i64,
        source: Option<TeamCategory>,
    },
    /// A synthesized card for an AVP, keyed by the AVP's employee id.
    Avp { avp_id: i64 },
}

/// One entry in the team list.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCard {
    pub kind: CardKind,
    pub team_type: Option<TeamType>,
    pub office_manager: Option<Employee>,
    /// Overseeing AVP, resolved against the directory where possible
    pub avp: Option<Employee>,
    /// Resolved AVP id; always `None` on AVP cards
    pub avp_id: Option<i64>,
    /// Always empty on AVP cards
    pub field_officers: Vec<Employee>,
}

impl TeamCard {
    pub fn is_avp_card(&self) -> bool {
        matches!(self.kind, CardKind::Avp { .. })
    }

    pub fn team_id(&self) -> Option<i64> {
        match self.kind {
            CardKind::Team { team_id, .. } => Some(team_id),
            CardKind::Avp { .. } => None,
        }
    }

    /// Single numeric id for list keying: the team id, or the negated AVP
    /// employee id for AVP cards.
    pub fn legacy_id(&self) -> i64 {
        match self.kind {
            CardKind::Team { team_id, .. } => team_id,
            CardKind::Avp { avp_id } => avp_id.saturating_neg(),
        }
    }

    /// Category used for filtering and grouping. Teams read from the
    /// hierarchy take the category of the list they were read from; other
    /// teams fall back to the explicit team type, then the normalized role
    /// of the office manager.
    pub fn category(&self) -> Option<TeamCategory> {
        match self.kind {
            CardKind::Avp { .. } => Some(TeamCategory::Avp),
            CardKind::Team {
                source: Some(source),
                ..
            } => Some(source),
            CardKind::Team { source: None, .. } => self
                .team_type
                .map(|team_type| team_type.category())
                .or_else(|| {
                    self.manager_category_role()
                        .and_then(TeamCategory::from_role)
                }),
        }
    }

    /// AVP id a regional team reports to.
    pub fn reports_to_avp(&self) -> Option<i64> {
        if self.is_avp_card() || self.category() != Some(TeamCategory::Regional) {
            return None;
        }
        self.avp_id
    }

    /// Office manager's role exactly as sent by the backend.
    pub fn manager_role(&self) -> Option<&str> {
        self.office_manager.as_ref().and_then(|m| m.role.as_deref())
    }

    pub fn manager_category_role(&self) -> Option<CategoryRole> {
        self.office_manager.as_ref().and_then(Employee::category_role)
    }

    pub fn sort_key(&self) -> (String, String) {
        self.office_manager
            .as_ref()
            .map(Employee::sort_key)
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        self.office_manager
            .as_ref()
            .map(Employee::display_name)
            .unwrap_or_default()
    }
}

/// Flat shape handed to the view layer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamCardView<'a> {
    id: i64,
    team_type: Option<TeamType>,
    category: Option<TeamCategory>,
    office_manager: Option<&'a Employee>,
    avp: Option<&'a Employee>,
    avp_id: Option<i64>,
    field_officers: &'a [Employee],
    is_avp_card: bool,
}

impl Serialize for TeamCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TeamCardView {
            id: self.legacy_id(),
            team_type: self.team_type,
            category: self.category(),
            office_manager: self.office_manager.as_ref(),
            avp: self.avp.as_ref(),
            avp_id: self.avp_id,
            field_officers: &self.field_officers,
            is_avp_card: self.is_avp_card(),
        }
        .serialize(serializer)
    }
}

/// Employee directory keyed by id, built from `employee/getAll`.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    by_id: HashMap<i64, Employee>,
}

impl Directory {
    pub fn new(employees: Vec<Employee>) -> Self {
        employees.into_iter().collect()
    }

    pub fn get(&self, id: i64) -> Option<&Employee> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Employees whose normalized role matches, sorted by name.
    pub fn with_role(&self, role: CategoryRole) -> Vec<&Employee> {
        let mut found: Vec<&Employee> = self
            .by_id
            .values()
            .filter(|e| e.category_role() == Some(role))
            .collect();
        found.sort_by_key(|e| (e.sort_key(), e.id));
        found
    }
}

impl FromIterator<Employee> for Directory {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        let by_id = iter
            .into_iter()
            .filter(Employee::has_id)
            .map(|e| (e.id, e))
            .collect();
        Self { by_id }
    }
}
