//! Role normalization.
//!
//! Roles arrive as free text ("Regional Manager", "regional_manager",
//! "office manager", "AVP"). Every category decision goes through
//! [`normalize_role`]; the raw string is kept separately for display grouping.

use serde::{Deserialize, Serialize};

/// Closed set of roles the console makes decisions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryRole {
    Coordinator,
    RegionalManager,
    Avp,
    FieldOfficer,
    Hr,
    DataManager,
    Admin,
}

impl CategoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryRole::Coordinator => "COORDINATOR",
            CategoryRole::RegionalManager => "REGIONAL_MANAGER",
            CategoryRole::Avp => "AVP",
            CategoryRole::FieldOfficer => "FIELD_OFFICER",
            CategoryRole::Hr => "HR",
            CategoryRole::DataManager => "DATA_MANAGER",
            CategoryRole::Admin => "ADMIN",
        }
    }

    /// Whether an employee with this role leads a team.
    pub fn leads_team(&self) -> bool {
        matches!(
            self,
            CategoryRole::Coordinator | CategoryRole::RegionalManager | CategoryRole::Avp
        )
    }
}

/// Canonical token form: trimmed, uppercase, separators collapsed to `_`.
fn canonical(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_sep = !out.is_empty();
            continue;
        }
        if pending_sep {
            out.push('_');
            pending_sep = false;
        }
        out.extend(ch.to_uppercase());
    }
    out
}

/// Map a raw role string onto [`CategoryRole`].
pub fn normalize_role(raw: &str) -> Option<CategoryRole> {
    match canonical(raw).as_str() {
        "COORDINATOR" => Some(CategoryRole::Coordinator),
        "MANAGER" | "OFFICE_MANAGER" | "REGIONAL_MANAGER" => Some(CategoryRole::RegionalManager),
        "AVP" => Some(CategoryRole::Avp),
        "FIELD_OFFICER" | "FIELDOFFICER" | "FO" => Some(CategoryRole::FieldOfficer),
        "HR" => Some(CategoryRole::Hr),
        "DATA_MANAGER" => Some(CategoryRole::DataManager),
        "ADMIN" => Some(CategoryRole::Admin),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_synonyms() {
        for raw in [
            "Manager",
            "Regional Manager",
            "regional_manager",
            "REGIONAL-MANAGER",
            "office manager",
            "  Office   Manager ",
            "OFFICE_MANAGER",
        ] {
            assert_eq!(
                normalize_role(raw),
                Some(CategoryRole::RegionalManager),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_other_roles() {
        assert_eq!(normalize_role("coordinator"), Some(CategoryRole::Coordinator));
        assert_eq!(normalize_role("AVP"), Some(CategoryRole::Avp));
        assert_eq!(normalize_role("Field Officer"), Some(CategoryRole::FieldOfficer));
        assert_eq!(normalize_role("fo"), Some(CategoryRole::FieldOfficer));
        assert_eq!(normalize_role("hr"), Some(CategoryRole::Hr));
        assert_eq!(normalize_role("Data Manager"), Some(CategoryRole::DataManager));
    }

    #[test]
    fn test_unknown_role() {
        assert_eq!(normalize_role(""), None);
        assert_eq!(normalize_role("   "), None);
        assert_eq!(normalize_role("Vice President"), None);
    }

    #[test]
    fn test_leads_team() {
        assert!(CategoryRole::Avp.leads_team());
        assert!(!CategoryRole::FieldOfficer.leads_team());
    }
}
