//! Field Operations Console
//!
//! Fetches the team hierarchy and employee directory, projects them into team
//! cards and prints the filtered, grouped view as JSON.

use std::collections::BTreeMap;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fieldops_console::hierarchy::{filter_cards, group_cards, managed_teams, CardFilter, CardKind};
use fieldops_console::prefs::ViewPreferences;
use fieldops_console::session::TeamsDashboard;
use fieldops_console::{ApiClient, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Field Operations Console");
    tracing::info!("API base URL: {}", config.api_base_url);
    tracing::info!("Preferences path: {:?}", config.prefs_path);

    if config.api_token.is_none() {
        tracing::warn!("No API token configured (FIELDOPS_API_TOKEN). Requests are unauthenticated!");
    }

    let mut prefs = ViewPreferences::load(&config.prefs_path);
    let filter = match CardFilter::try_parse(&config.team_filter) {
        Some(CardFilter::All) | None => prefs.team_filter,
        Some(filter) => filter,
    };
    tracing::info!("Team filter: {}", filter);

    let client = ApiClient::new(&config)?;
    let dashboard = TeamsDashboard::new(client);

    let loaded = dashboard.refresh().await;
    if let Some(error) = dashboard.error().await {
        tracing::error!("{}", error);
        if !loaded {
            return Err(error.into());
        }
    }

    let cards = dashboard.cards().await;
    let visible = filter_cards(&cards, &filter);

    let managed: BTreeMap<i64, Vec<i64>> = visible
        .iter()
        .filter_map(|card| match card.kind {
            CardKind::Avp { avp_id } => Some(avp_id),
            CardKind::Team { .. } => None,
        })
        .map(|avp_id| {
            let teams = managed_teams(&cards, avp_id)
                .iter()
                .filter_map(|team| team.team_id())
                .collect();
            (avp_id, teams)
        })
        .collect();

    let groups = group_cards(visible.iter().copied());
    let report = serde_json::json!({
        "filter": filter,
        "total": visible.len(),
        "groups": groups,
        "managedTeams": managed,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    prefs.team_filter = filter;
    if let Err(e) = prefs.save(&config.prefs_path) {
        tracing::warn!("Could not save view preferences: {}", e);
    }

    Ok(())
}
