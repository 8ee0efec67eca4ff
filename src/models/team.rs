//! Team model and the polymorphic AVP reference.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::employee::Employee;
use super::lenient::{self, id_from_value};
use super::role::CategoryRole;

/// Backend team type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamType {
    CoordinatorTeam,
    RegionalManagerTeam,
    AvpTeam,
}

impl TeamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamType::CoordinatorTeam => "COORDINATOR_TEAM",
            TeamType::RegionalManagerTeam => "REGIONAL_MANAGER_TEAM",
            TeamType::AvpTeam => "AVP_TEAM",
        }
    }

    /// Parse the backend string; unknown values are treated as absent.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COORDINATOR_TEAM" => Some(TeamType::CoordinatorTeam),
            "REGIONAL_MANAGER_TEAM" => Some(TeamType::RegionalManagerTeam),
            "AVP_TEAM" => Some(TeamType::AvpTeam),
            _ => None,
        }
    }

    pub fn category(&self) -> TeamCategory {
        match self {
            TeamType::CoordinatorTeam => TeamCategory::Coordinator,
            TeamType::RegionalManagerTeam => TeamCategory::Regional,
            TeamType::AvpTeam => TeamCategory::Avp,
        }
    }
}

/// Category a team card is filtered and grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamCategory {
    Coordinator,
    Regional,
    Avp,
}

impl TeamCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamCategory::Coordinator => "coordinator",
            TeamCategory::Regional => "regional",
            TeamCategory::Avp => "avp",
        }
    }

    pub fn from_role(role: CategoryRole) -> Option<Self> {
        match role {
            CategoryRole::Coordinator => Some(TeamCategory::Coordinator),
            CategoryRole::RegionalManager => Some(TeamCategory::Regional),
            CategoryRole::Avp => Some(TeamCategory::Avp),
            _ => None,
        }
    }
}

/// Reference to an overseeing AVP.
///
/// Decoded from `null`, an id (number or numeric string), an embedded
/// employee object, or a list of any of those (first element wins).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum AvpRef {
    #[default]
    None,
    ById(i64),
    Embedded(Employee),
}

impl From<Value> for AvpRef {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AvpRef::None,
            Value::Array(items) => items
                .into_iter()
                .next()
                .map(AvpRef::from)
                .unwrap_or(AvpRef::None),
            Value::Object(_) => AvpRef::Embedded(Employee::from(value)),
            other => id_from_value(&other).map(AvpRef::ById).unwrap_or(AvpRef::None),
        }
    }
}

impl Serialize for AvpRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AvpRef::None => serializer.serialize_none(),
            AvpRef::ById(id) => serializer.serialize_i64(*id),
            AvpRef::Embedded(employee) => employee.serialize(serializer),
        }
    }
}

impl AvpRef {
    pub fn is_none(&self) -> bool {
        matches!(self, AvpRef::None)
    }

    /// Id carried by an embedded object, if it has one.
    pub fn embedded_id(&self) -> Option<i64> {
        match self {
            AvpRef::Embedded(e) if e.has_id() => Some(e.id),
            _ => None,
        }
    }

    /// Bare id, if the reference is one.
    pub fn raw_id(&self) -> Option<i64> {
        match self {
            AvpRef::ById(id) => Some(*id),
            _ => None,
        }
    }

    pub fn employee(&self) -> Option<&Employee> {
        match self {
            AvpRef::Embedded(e) => Some(e),
            _ => None,
        }
    }
}

/// A manager-led team as returned by `employee/team/getByEmployee`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_manager: Option<Employee>,
    pub avp: AvpRef,
    #[serde(deserialize_with = "lenient::list")]
    pub field_officers: Vec<Employee>,
}

impl Team {
    pub fn team_type(&self) -> Option<TeamType> {
        self.team_type.as_deref().and_then(TeamType::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_avp_ref_shapes() {
        assert_eq!(AvpRef::from(json!(null)), AvpRef::None);
        assert_eq!(AvpRef::from(json!(7)), AvpRef::ById(7));
        assert_eq!(AvpRef::from(json!("7")), AvpRef::ById(7));
        assert_eq!(AvpRef::from(json!([])), AvpRef::None);
        assert_eq!(AvpRef::from(json!([8, 9])), AvpRef::ById(8));
        assert_eq!(AvpRef::from(json!(true)), AvpRef::None);

        let embedded = AvpRef::from(json!({"id": 99, "name": "Vik Avp"}));
        assert_eq!(embedded.embedded_id(), Some(99));
        assert_eq!(embedded.raw_id(), None);
        assert_eq!(embedded.employee().unwrap().first_name, "Vik");

        let listed = AvpRef::from(json!([{"id": 5, "firstName": "Ana"}]));
        assert_eq!(listed.embedded_id(), Some(5));
    }

    #[test]
    fn test_embedded_without_id() {
        let avp = AvpRef::from(json!({"name": "Nobody"}));
        assert!(!avp.is_none());
        assert_eq!(avp.embedded_id(), None);
    }

    #[test]
    fn test_team_type_parse() {
        assert_eq!(TeamType::parse("AVP_TEAM"), Some(TeamType::AvpTeam));
        assert_eq!(
            TeamType::parse("regional_manager_team"),
            Some(TeamType::RegionalManagerTeam)
        );
        assert_eq!(TeamType::parse("SALES_TEAM"), None);
        assert_eq!(
            TeamType::CoordinatorTeam.category(),
            TeamCategory::Coordinator
        );
    }

    #[test]
    fn test_team_tolerates_missing_fields() {
        let team: Team = serde_json::from_value(json!({
            "id": "12",
            "avp": 3,
            "fieldOfficers": null
        }))
        .unwrap();
        assert_eq!(team.id, 12);
        assert_eq!(team.avp, AvpRef::ById(3));
        assert!(team.field_officers.is_empty());
        assert!(team.office_manager.is_none());
        assert!(team.team_type().is_none());
    }
}
