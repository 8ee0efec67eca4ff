//! Grouping of team cards for display.
//!
//! Filtering works on normalized categories, but regional cards are grouped
//! by the office manager's role string exactly as the backend sent it, so
//! "Regional Manager" and "regional_manager" end up in separate groups.

use serde::Serialize;

use super::card::TeamCard;
use crate::models::{Employee, TeamCategory};

/// Group key for regional cards whose manager has no role string.
pub const UNASSIGNED_ROLE: &str = "Unassigned";

/// Regional cards sharing one raw role string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleGroup<'a> {
    pub role: String,
    pub cards: Vec<&'a TeamCard>,
}

/// Display partition of a (filtered) card list.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGroups<'a> {
    pub avp_cards: Vec<&'a TeamCard>,
    pub coordinator_cards: Vec<&'a TeamCard>,
    /// In first-seen order
    pub regional_groups: Vec<RoleGroup<'a>>,
    /// Cards without a category; only shown under "all"
    pub uncategorized: Vec<&'a TeamCard>,
}

impl CardGroups<'_> {
    pub fn len(&self) -> usize {
        self.avp_cards.len()
            + self.coordinator_cards.len()
            + self.uncategorized.len()
            + self
                .regional_groups
                .iter()
                .map(|g| g.cards.len())
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition cards into AVP, coordinator and per-role regional groups.
pub fn group_cards<'a, I>(cards: I) -> CardGroups<'a>
where
    I: IntoIterator<Item = &'a TeamCard>,
{
    let mut groups = CardGroups::default();

    for card in cards {
        match card.category() {
            Some(TeamCategory::Avp) => groups.avp_cards.push(card),
            Some(TeamCategory::Coordinator) => groups.coordinator_cards.push(card),
            Some(TeamCategory::Regional) => {
                let role = card.manager_role().unwrap_or(UNASSIGNED_ROLE);
                match groups.regional_groups.iter_mut().find(|g| g.role == role) {
                    Some(group) => group.cards.push(card),
                    None => groups.regional_groups.push(RoleGroup {
                        role: role.to_string(),
                        cards: vec![card],
                    }),
                }
            }
            None => groups.uncategorized.push(card),
        }
    }

    groups
}

/// Field officers who can still be added to a team of `category`: anyone not
/// already on another team of the same category. `editing_team` is the team
/// being edited; its own officers stay available.
pub fn available_officers<'a>(
    officers: &'a [Employee],
    cards: &[TeamCard],
    category: TeamCategory,
    editing_team: Option<i64>,
) -> Vec<&'a Employee> {
    let taken: std::collections::HashSet<i64> = cards
        .iter()
        .filter(|card| !card.is_avp_card() && card.category() == Some(category))
        .filter(|card| editing_team.is_none() || card.team_id() != editing_team)
        .flat_map(|card| card.field_officers.iter().map(|fo| fo.id))
        .collect();

    officers
        .iter()
        .filter(|officer| !taken.contains(&officer.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{filter_cards, project, CardFilter, Directory};
    use crate::models::HierarchyResponse;
    use serde_json::json;

    fn sample() -> Vec<TeamCard> {
        let raw: HierarchyResponse = serde_json::from_value(json!({
            "regionalManagerTeams": [
                {"teamId": 1, "manager": {"id": 10, "name": "Alice Rao", "role": "Regional Manager"},
                 "avp": {"id": 99, "name": "Vik Avp"},
                 "fieldOfficers": [{"id": 20, "name": "Sam FO"}]},
                {"teamId": 2, "manager": {"id": 11, "name": "Bala K", "role": "regional_manager"},
                 "fieldOfficers": [{"id": 21, "name": "Tara FO"}]},
                {"teamId": 3, "manager": {"id": 12, "name": "Chitra N", "role": "Manager"}},
                {"teamId": 4, "manager": {"id": 13, "name": "Deepa S", "role": "Regional Manager"}},
                {"teamId": 5, "manager": {"id": 14, "name": "Esha T"}}
            ],
            "coordinatorTeams": [
                {"teamId": 6, "manager": {"id": 15, "name": "Farid C", "role": "Coordinator"},
                 "fieldOfficers": [{"id": 20, "name": "Sam FO"}]}
            ]
        }))
        .unwrap();
        project(&raw, &Directory::default())
    }

    #[test]
    fn test_regional_groups_use_raw_role_strings() {
        let cards = sample();
        let groups = group_cards(&cards);

        let roles: Vec<&str> = groups
            .regional_groups
            .iter()
            .map(|g| g.role.as_str())
            .collect();
        assert_eq!(
            roles,
            vec!["Regional Manager", "regional_manager", "Manager", UNASSIGNED_ROLE]
        );
        assert_eq!(groups.regional_groups[0].cards.len(), 2);
        assert_eq!(groups.avp_cards.len(), 1);
        assert_eq!(groups.coordinator_cards.len(), 1);
        assert!(groups.uncategorized.is_empty());
        assert_eq!(groups.len(), cards.len());
    }

    #[test]
    fn test_grouping_a_filtered_subset() {
        let cards = sample();
        let groups = group_cards(filter_cards(&cards, &CardFilter::Coordinator));
        assert!(groups.regional_groups.is_empty());
        assert!(groups.avp_cards.is_empty());
        assert_eq!(groups.coordinator_cards[0].team_id(), Some(6));
    }

    #[test]
    fn test_available_officers_are_category_scoped() {
        let cards = sample();
        let officers = vec![
            Employee {
                first_name: "Sam".to_string(),
                ..Employee::partial(20)
            },
            Employee {
                first_name: "Tara".to_string(),
                ..Employee::partial(21)
            },
            Employee {
                first_name: "Uma".to_string(),
                ..Employee::partial(22)
            },
        ];

        let ids = |found: Vec<&Employee>| found.iter().map(|e| e.id).collect::<Vec<_>>();

        assert_eq!(
            ids(available_officers(&officers, &cards, TeamCategory::Regional, None)),
            vec![22]
        );
        assert_eq!(
            ids(available_officers(&officers, &cards, TeamCategory::Regional, Some(2))),
            vec![21, 22]
        );
        assert_eq!(
            ids(available_officers(&officers, &cards, TeamCategory::Coordinator, None)),
            vec![21, 22]
        );
    }
}
