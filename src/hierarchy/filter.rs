//! Category filter tokens for the team list.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use super::card::{CardKind, TeamCard};
use crate::models::TeamCategory;

/// A team-list filter selected in the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CardFilter {
    #[default]
    All,
    RegionalManager,
    Coordinator,
    AvpTeam,
    /// Non-AVP cards that report to some AVP
    WithAvp,
    /// Non-AVP cards with no AVP
    WithoutAvp,
    /// One AVP's card plus every team reporting to them
    Avp(i64),
}

impl CardFilter {
    /// Parse a filter token. Unknown tokens fall back to [`CardFilter::All`].
    pub fn parse(token: &str) -> Self {
        Self::try_parse(token).unwrap_or_else(|| {
            warn!("Unknown team filter '{}', showing all teams", token);
            CardFilter::All
        })
    }

    pub fn try_parse(token: &str) -> Option<Self> {
        let token = token.trim();
        match token {
            "all" | "" => Some(CardFilter::All),
            "regional-manager" => Some(CardFilter::RegionalManager),
            "coordinator" => Some(CardFilter::Coordinator),
            "avp-team" => Some(CardFilter::AvpTeam),
            "with" => Some(CardFilter::WithAvp),
            "without" => Some(CardFilter::WithoutAvp),
            _ => token
                .strip_prefix("avp-")
                .and_then(|id| id.parse().ok())
                .map(CardFilter::Avp),
        }
    }

    pub fn matches(&self, card: &TeamCard) -> bool {
        match self {
            CardFilter::All => true,
            CardFilter::RegionalManager => card.category() == Some(TeamCategory::Regional),
            CardFilter::Coordinator => card.category() == Some(TeamCategory::Coordinator),
            CardFilter::AvpTeam => card.category() == Some(TeamCategory::Avp),
            CardFilter::WithAvp => !card.is_avp_card() && card.avp_id.is_some(),
            CardFilter::WithoutAvp => !card.is_avp_card() && card.avp_id.is_none(),
            CardFilter::Avp(id) => match card.kind {
                CardKind::Avp { avp_id } => avp_id == *id,
                CardKind::Team { .. } => card.avp_id == Some(*id),
            },
        }
    }
}

impl fmt::Display for CardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFilter::All => f.write_str("all"),
            CardFilter::RegionalManager => f.write_str("regional-manager"),
            CardFilter::Coordinator => f.write_str("coordinator"),
            CardFilter::AvpTeam => f.write_str("avp-team"),
            CardFilter::WithAvp => f.write_str("with"),
            CardFilter::WithoutAvp => f.write_str("without"),
            CardFilter::Avp(id) => write!(f, "avp-{}", id),
        }
    }
}

impl Serialize for CardFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CardFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(CardFilter::parse(&token))
    }
}

/// Cards matching `filter`, in their current order.
pub fn filter_cards<'a>(cards: &'a [TeamCard], filter: &CardFilter) -> Vec<&'a TeamCard> {
    cards.iter().filter(|card| filter.matches(card)).collect()
}

/// Regional teams reporting to the AVP with id `avp_id`, recomputed from the
/// real team cards on every call.
pub fn managed_teams(cards: &[TeamCard], avp_id: i64) -> Vec<&TeamCard> {
    cards
        .iter()
        .filter(|card| card.reports_to_avp() == Some(avp_id))
        .collect()
}
