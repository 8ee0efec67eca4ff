//! Projection of the raw hierarchy payload into team cards.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::card::{CardKind, Directory, TeamCard};
use crate::models::{
    AvpRef, Employee, HierarchyResponse, Team, TeamCategory, TeamRecord, TeamType,
};

/// Resolve an AVP reference to an id: embedded object id, then bare id,
/// then a separate `avpId` field. Ids that are not positive are ignored.
pub fn resolve_avp_id(avp: &AvpRef, avp_id_field: Option<i64>) -> Option<i64> {
    let raw = avp
        .raw_id()
        .filter(|id| *id > 0)
        .or(avp_id_field.filter(|id| *id > 0));
    match (avp.embedded_id(), raw) {
        (Some(embedded), Some(raw)) if embedded != raw => {
            debug!(
                "AVP reference disagrees: embedded id {} vs raw id {}; using embedded",
                embedded, raw
            );
            Some(embedded)
        }
        (Some(embedded), _) => Some(embedded),
        (None, raw) => raw,
    }
}

/// Prefer a named embedded employee, then the directory, then whatever
/// partial data there is.
fn resolve_employee(
    embedded: Option<&Employee>,
    id: Option<i64>,
    directory: &Directory,
) -> Option<Employee> {
    if let Some(e) = embedded.filter(|e| !e.display_name().is_empty()) {
        return Some(e.clone());
    }
    if let Some(found) = id.and_then(|id| directory.get(id)) {
        return Some(found.clone());
    }
    embedded.cloned().or_else(|| id.map(Employee::partial))
}

/// Build the flat, de-duplicated card list.
///
/// Real teams come from `regionalManagerTeams` and `coordinatorTeams`, plus
/// any `avpTeams[].managers` entry not already listed. Every AVP that a
/// regional team reports to gets one extra card with no field officers.
/// The result is sorted by office-manager name.
pub fn project(raw: &HierarchyResponse, directory: &Directory) -> Vec<TeamCard> {
    let regional_lookup: HashMap<i64, &TeamRecord> = raw
        .regional_manager_teams
        .iter()
        .filter_map(|record| record.key().map(|id| (id, record)))
        .collect();

    // Embedded AVP objects seen anywhere in the payload, by id.
    let mut embedded_avps: HashMap<i64, Employee> = HashMap::new();
    let mut remember = |avp: &AvpRef| {
        if let (Some(id), Some(employee)) = (avp.embedded_id(), avp.employee()) {
            if !employee.display_name().is_empty() {
                embedded_avps.entry(id).or_insert_with(|| employee.clone());
            }
        }
    };
    for group in &raw.avp_teams {
        remember(&group.avp);
        for entry in &group.managers {
            remember(&entry.avp);
        }
    }
    for record in &raw.regional_manager_teams {
        remember(&record.avp);
    }

    let mut emitted: HashSet<i64> = HashSet::new();
    let mut real: Vec<TeamCard> = Vec::new();

    let listed = raw
        .regional_manager_teams
        .iter()
        .map(|record| (record, TeamCategory::Regional))
        .chain(
            raw.coordinator_teams
                .iter()
                .map(|record| (record, TeamCategory::Coordinator)),
        );
    for (record, source) in listed {
        let Some(team_id) = record.key() else {
            warn!("Skipping {} team without an id", source.as_str());
            continue;
        };
        if !emitted.insert(team_id) {
            continue;
        }
        real.push(team_card(
            team_id,
            source,
            record,
            record.field_officers.clone(),
            None,
            directory,
        ));
    }

    for group in &raw.avp_teams {
        let group_avp = group.avp_ref();
        for entry in &group.managers {
            let Some(team_id) = entry.key() else {
                warn!("Skipping AVP-managed team without an id");
                continue;
            };
            if !emitted.insert(team_id) {
                continue;
            }
            let field_officers = regional_lookup
                .get(&team_id)
                .map(|record| record.field_officers.clone())
                .unwrap_or_else(|| entry.field_officers.clone());
            real.push(team_card(
                team_id,
                TeamCategory::Regional,
                entry,
                field_officers,
                Some(&group_avp),
                directory,
            ));
        }
    }

    sort_cards(&mut real);

    let mut avp_ids: Vec<i64> = Vec::new();
    for avp_id in real.iter().filter_map(TeamCard::reports_to_avp) {
        if !avp_ids.contains(&avp_id) {
            avp_ids.push(avp_id);
        }
    }

    let avp_cards: Vec<TeamCard> = avp_ids
        .into_iter()
        .map(|avp_id| TeamCard {
            kind: CardKind::Avp { avp_id },
            team_type: Some(TeamType::AvpTeam),
            office_manager: resolve_employee(embedded_avps.get(&avp_id), Some(avp_id), directory),
            avp: None,
            avp_id: None,
            field_officers: Vec::new(),
        })
        .collect();

    debug!(
        "Projected {} teams and {} AVP cards",
        real.len(),
        avp_cards.len()
    );

    let mut cards = real;
    cards.extend(avp_cards);
    sort_cards(&mut cards);
    cards
}

fn team_card(
    team_id: i64,
    source: TeamCategory,
    record: &TeamRecord,
    field_officers: Vec<Employee>,
    group_avp: Option<&AvpRef>,
    directory: &Directory,
) -> TeamCard {
    let own_avp_id = resolve_avp_id(&record.avp, record.avp_id);
    let (avp_ref, avp_id) = match group_avp {
        Some(group) if record.avp.is_none() && own_avp_id.is_none() => {
            (group, resolve_avp_id(group, None))
        }
        _ => (&record.avp, own_avp_id),
    };

    TeamCard {
        kind: CardKind::Team {
            team_id,
            source: Some(source),
        },
        team_type: record.team_type(),
        office_manager: record.leader().cloned(),
        avp: resolve_employee(avp_ref.employee(), avp_id, directory),
        avp_id,
        field_officers,
    }
}

/// Card for a team fetched outside the hierarchy (`employee/team/getByEmployee`).
/// It has no source list, so its category comes from team type or role alone.
pub fn team_to_card(team: &Team, directory: &Directory) -> TeamCard {
    let avp_id = resolve_avp_id(&team.avp, None);
    TeamCard {
        kind: CardKind::Team {
            team_id: team.id,
            source: None,
        },
        team_type: team.team_type(),
        office_manager: team.office_manager.clone(),
        avp: resolve_employee(team.avp.employee(), avp_id, directory),
        avp_id,
        field_officers: team.field_officers.clone(),
    }
}

/// Stable, case-insensitive sort by office-manager name.
pub fn sort_cards(cards: &mut [TeamCard]) {
    cards.sort_by_cached_key(TeamCard::sort_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn raw(payload: Value) -> HierarchyResponse {
        serde_json::from_value(payload).unwrap()
    }

    fn ids(cards: &[TeamCard]) -> Vec<i64> {
        cards.iter().map(TeamCard::legacy_id).collect()
    }

    #[test]
    fn test_empty_payload_yields_no_cards() {
        let cards = project(&raw(json!({})), &Directory::default());
        assert!(cards.is_empty());
    }

    #[test]
    fn test_single_regional_team_with_avp() {
        let cards = project(
            &raw(json!({
                "regionalManagerTeams": [{
                    "teamId": 1,
                    "manager": {"id": 10, "name": "Alice Rao"},
                    "avp": {"id": 99, "name": "Vik Avp"},
                    "fieldOfficers": [{"id": 20, "name": "Sam FO"}]
                }]
            })),
            &Directory::default(),
        );

        assert_eq!(cards.len(), 2);
        let regional = cards.iter().find(|c| c.team_id() == Some(1)).unwrap();
        assert_eq!(regional.office_manager.as_ref().unwrap().first_name, "Alice");
        assert_eq!(regional.field_officers.len(), 1);
        assert_eq!(regional.field_officers[0].first_name, "Sam");
        assert_eq!(regional.avp_id, Some(99));
        assert_eq!(regional.category(), Some(TeamCategory::Regional));

        let avp = cards.iter().find(|c| c.is_avp_card()).unwrap();
        assert_eq!(avp.legacy_id(), -99);
        assert_eq!(avp.office_manager.as_ref().unwrap().display_name(), "Vik Avp");
        assert!(avp.field_officers.is_empty());
    }

    #[test]
    fn test_team_listed_twice_is_emitted_once() {
        let cards = project(
            &raw(json!({
                "avpTeams": [{
                    "avp": {"id": 7, "name": "Priya Avp"},
                    "managers": [
                        {"teamId": 1, "manager": {"id": 10, "name": "Alice Rao"}},
                        {"teamId": 2, "manager": {"id": 11, "name": "Bala K"}}
                    ]
                }],
                "regionalManagerTeams": [{
                    "teamId": 1,
                    "manager": {"id": 10, "name": "Alice Rao"},
                    "avp": 7,
                    "fieldOfficers": [{"id": 20, "name": "Sam FO"}]
                }]
            })),
            &Directory::default(),
        );

        let team_one: Vec<&TeamCard> = cards.iter().filter(|c| c.team_id() == Some(1)).collect();
        assert_eq!(team_one.len(), 1);
        assert_eq!(team_one[0].field_officers.len(), 1);

        // Team 2 only exists inside the AVP group and inherits its AVP.
        let team_two = cards.iter().find(|c| c.team_id() == Some(2)).unwrap();
        assert_eq!(team_two.avp_id, Some(7));
        assert!(team_two.field_officers.is_empty());

        assert_eq!(cards.iter().filter(|c| c.is_avp_card()).count(), 1);
        assert_eq!(ids(&cards), vec![1, 2, -7]);
    }

    #[test]
    fn test_officers_recovered_from_regional_list() {
        let cards = project(
            &raw(json!({
                "avpTeams": [{
                    "avp": 5,
                    "managers": [{"teamId": 3, "manager": {"id": 12, "name": "Chitra N"}}]
                }],
                "regionalManagerTeams": [{
                    "teamId": 3,
                    "manager": {"id": 12, "name": "Chitra N"},
                    "fieldOfficers": [{"id": 30, "name": "Dev O"}, {"id": 31, "name": "Eli P"}]
                }]
            })),
            &Directory::default(),
        );
        let team = cards.iter().find(|c| c.team_id() == Some(3)).unwrap();
        assert_eq!(team.field_officers.len(), 2);
    }

    #[test]
    fn test_avp_card_uses_directory_then_partial() {
        let directory = Directory::new(vec![Employee {
            first_name: "Gita".to_string(),
            last_name: "Avp".to_string(),
            role: Some("AVP".to_string()),
            ..Employee::partial(40)
        }]);
        let cards = project(
            &raw(json!({
                "regionalManagerTeams": [
                    {"teamId": 1, "manager": {"id": 10, "name": "Alice Rao"}, "avp": 40},
                    {"teamId": 2, "manager": {"id": 11, "name": "Bala K"}, "avpId": 41}
                ]
            })),
            &directory,
        );

        let known = cards.iter().find(|c| c.legacy_id() == -40).unwrap();
        assert_eq!(known.office_manager.as_ref().unwrap().display_name(), "Gita Avp");

        let unknown = cards.iter().find(|c| c.legacy_id() == -41).unwrap();
        let partial = unknown.office_manager.as_ref().unwrap();
        assert_eq!(partial.id, 41);
        assert_eq!(partial.display_name(), "");

        let team = cards.iter().find(|c| c.team_id() == Some(1)).unwrap();
        assert_eq!(team.avp.as_ref().unwrap().first_name, "Gita");
    }

    #[test]
    fn test_coordinators_get_no_avp_card() {
        let cards = project(
            &raw(json!({
                "coordinatorTeams": [{
                    "teamId": 8,
                    "manager": {"id": 15, "name": "Hari C", "role": "Coordinator"},
                    "avp": 99
                }]
            })),
            &Directory::default(),
        );
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].category(), Some(TeamCategory::Coordinator));
    }

    #[test]
    fn test_sort_is_case_insensitive_with_last_name_tiebreak() {
        let cards = project(
            &raw(json!({
                "regionalManagerTeams": [
                    {"teamId": 1, "manager": {"id": 1, "firstName": "anil", "lastName": "Zaveri"}},
                    {"teamId": 2, "manager": {"id": 2, "firstName": "Anil", "lastName": "bose"}},
                    {"teamId": 3, "manager": {"id": 3, "firstName": "", "lastName": "Akhtar"}},
                    {"teamId": 4, "manager": {"id": 4, "firstName": "Bina", "lastName": "Rao"}}
                ]
            })),
            &Directory::default(),
        );
        assert_eq!(ids(&cards), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_team_to_card_infers_category_from_role() {
        let team: Team = serde_json::from_value(json!({
            "id": 6,
            "officeManager": {"id": 16, "name": "Isha M", "role": "office manager"},
            "avp": [{"id": 50}],
            "fieldOfficers": [{"id": 60, "name": "Jay Q"}]
        }))
        .unwrap();
        let directory = Directory::new(vec![Employee {
            first_name: "Kiran".to_string(),
            ..Employee::partial(50)
        }]);

        let card = team_to_card(&team, &directory);
        assert_eq!(card.category(), Some(TeamCategory::Regional));
        assert_eq!(card.avp_id, Some(50));
        assert_eq!(card.avp.as_ref().unwrap().first_name, "Kiran");
        assert_eq!(card.reports_to_avp(), Some(50));
    }

    #[test]
    fn test_resolve_avp_id_order() {
        let embedded = AvpRef::Embedded(Employee::partial(9));
        assert_eq!(resolve_avp_id(&embedded, Some(4)), Some(9));
        assert_eq!(resolve_avp_id(&AvpRef::ById(4), Some(5)), Some(4));
        assert_eq!(resolve_avp_id(&AvpRef::None, Some(5)), Some(5));
        assert_eq!(
            resolve_avp_id(&AvpRef::Embedded(Employee::partial(0)), Some(6)),
            Some(6)
        );
        assert_eq!(resolve_avp_id(&AvpRef::None, None), None);
        assert_eq!(resolve_avp_id(&AvpRef::ById(0), Some(3)), Some(3));
        assert_eq!(resolve_avp_id(&AvpRef::ById(-5), None), None);
        assert_eq!(resolve_avp_id(&AvpRef::None, Some(i64::MIN)), None);
    }

    #[test]
    fn test_non_positive_avp_ids_make_no_avp_card() {
        let cards = project(
            &raw(json!({
                "regionalManagerTeams": [
                    {"teamId": 5, "manager": {"id": 10, "name": "Alice Rao"}, "avp": 0},
                    {"teamId": 1, "manager": {"id": 11, "name": "Bala K"}, "avp": -5},
                    {"teamId": 2, "manager": {"id": 12, "name": "Chitra N"},
                     "avp": "-9223372036854775808"}
                ]
            })),
            &Directory::default(),
        );

        assert_eq!(ids(&cards), vec![5, 1, 2]);
        assert!(cards.iter().all(|c| !c.is_avp_card() && c.avp_id.is_none()));
    }

    #[test]
    fn test_source_list_wins_over_team_type_and_role() {
        let cards = project(
            &raw(json!({
                "regionalManagerTeams": [{
                    "teamId": 1,
                    "teamType": "COORDINATOR_TEAM",
                    "manager": {"id": 10, "name": "Alice Rao", "role": "Coordinator"},
                    "avp": 8
                }],
                "coordinatorTeams": [{
                    "teamId": 2,
                    "manager": {"id": 11, "name": "Bala K", "role": "Regional Manager"},
                    "avp": 7
                }]
            })),
            &Directory::default(),
        );

        let team_one = cards.iter().find(|c| c.team_id() == Some(1)).unwrap();
        assert_eq!(team_one.category(), Some(TeamCategory::Regional));
        let team_two = cards.iter().find(|c| c.team_id() == Some(2)).unwrap();
        assert_eq!(team_two.category(), Some(TeamCategory::Coordinator));

        let avp_ids: Vec<i64> = cards
            .iter()
            .filter(|c| c.is_avp_card())
            .map(TeamCard::legacy_id)
            .collect();
        assert_eq!(avp_ids, vec![-8]);
    }
}
