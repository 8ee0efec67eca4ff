//! Teams dashboard state: hierarchy, directory and the projected cards.

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{Generation, Latest};
use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::hierarchy::{project, sort_cards, team_to_card, Directory, TeamCard};
use crate::models::{AttendanceLogRequest, CreateEmployeeRequest, Employee, HierarchyResponse};

/// Status written to the attendance log for a freshly created employee.
const NEW_EMPLOYEE_ATTENDANCE: &str = "PRESENT";

/// Everything the teams panel renders from.
#[derive(Debug, Clone, Default)]
pub struct TeamsState {
    pub hierarchy: HierarchyResponse,
    pub directory: Directory,
    pub cards: Vec<TeamCard>,
    /// Inline error for the panel; cleared by the next successful fetch
    pub error: Option<String>,
    /// Inline error for the "teams by employee" dropdown
    pub selection_error: Option<String>,
}

impl TeamsState {
    fn reproject(&mut self) {
        self.cards = project(&self.hierarchy, &self.directory);
    }
}

/// Fetches and holds the team hierarchy view.
///
/// The hierarchy and the employee directory are fetched concurrently and
/// only combined once both have resolved. Each half has its own generation
/// so a late response for either never replaces a newer one.
#[derive(Debug)]
pub struct TeamsDashboard {
    client: ApiClient,
    hierarchy_gen: Generation,
    directory_gen: Generation,
    state: RwLock<TeamsState>,
    /// Teams of the manager picked in the "teams by employee" dropdown
    selected: Latest<Vec<TeamCard>>,
}

impl TeamsDashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            hierarchy_gen: Generation::new(),
            directory_gen: Generation::new(),
            state: RwLock::new(TeamsState::default()),
            selected: Latest::new(Vec::new()),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Re-fetch hierarchy and directory, then rebuild the cards.
    ///
    /// Returns `false` if the hierarchy could not be loaded or a newer
    /// refresh superseded this one.
    pub async fn refresh(&self) -> bool {
        let hierarchy_ticket = self.hierarchy_gen.begin();
        let directory_ticket = self.directory_gen.begin();

        let (hierarchy, employees) =
            tokio::join!(self.client.team_hierarchy(), self.client.list_employees());

        let mut state = self.state.write().await;
        let hierarchy_current = self.hierarchy_gen.is_current(hierarchy_ticket);
        let directory_current = self.directory_gen.is_current(directory_ticket);
        if !hierarchy_current && !directory_current {
            debug!("Discarding superseded team refresh");
            return false;
        }

        let mut error = None;
        if directory_current {
            match employees {
                Ok(employees) => state.directory = Directory::new(employees),
                Err(e) => {
                    warn!("Employee directory fetch failed: {}", e);
                    error = Some(e.inline_message());
                }
            }
        }

        let mut loaded = false;
        if hierarchy_current {
            match hierarchy {
                Ok(raw) => {
                    state.hierarchy = raw;
                    loaded = true;
                }
                Err(e) => {
                    warn!("Team hierarchy fetch failed: {}", e);
                    error = Some(e.inline_message());
                }
            }
        }

        state.reproject();
        state.error = error;
        info!(
            "Teams refreshed: {} cards, {} employees in directory",
            state.cards.len(),
            state.directory.len()
        );
        loaded
    }

    /// Re-fetch only the directory and re-run AVP resolution against the
    /// hierarchy already held.
    pub async fn refresh_directory(&self) -> bool {
        let ticket = self.directory_gen.begin();
        let employees = self.client.list_employees().await;

        let mut state = self.state.write().await;
        if !self.directory_gen.is_current(ticket) {
            debug!("Discarding superseded directory refresh");
            return false;
        }

        match employees {
            Ok(employees) => {
                state.directory = Directory::new(employees);
                state.reproject();
                state.error = None;
                true
            }
            Err(e) => {
                warn!("Employee directory fetch failed: {}", e);
                state.error = Some(e.inline_message());
                false
            }
        }
    }

    /// Load the teams led by `employee_id` for the dependent dropdown.
    ///
    /// A selection made later always wins over one whose response arrives
    /// later: results and errors of a superseded selection are dropped.
    /// Returns whether this selection's teams were stored.
    pub async fn select_manager(&self, employee_id: i64) -> bool {
        let ticket = self.selected.begin();
        let teams = match self.client.teams_by_employee(employee_id).await {
            Ok(teams) => teams,
            Err(e) => {
                if !self.selected.is_current(ticket) {
                    debug!("Dropping error of superseded selection {}: {}", employee_id, e);
                    return false;
                }
                warn!("Teams for employee {} failed: {}", employee_id, e);
                self.state.write().await.selection_error = Some(e.inline_message());
                return false;
            }
        };

        let directory = self.state.read().await.directory.clone();
        let mut cards: Vec<TeamCard> = teams
            .iter()
            .map(|team| team_to_card(team, &directory))
            .collect();
        sort_cards(&mut cards);

        let stored = self.selected.commit(ticket, cards).await;
        if stored {
            self.state.write().await.selection_error = None;
        }
        stored
    }

    pub async fn selection_error(&self) -> Option<String> {
        self.state.read().await.selection_error.clone()
    }

    pub async fn selected_teams(&self) -> Vec<TeamCard> {
        self.selected.get().await
    }

    pub async fn snapshot(&self) -> TeamsState {
        self.state.read().await.clone()
    }

    pub async fn cards(&self) -> Vec<TeamCard> {
        self.state.read().await.cards.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }
}

/// Create an employee, then write their first attendance entry.
///
/// The attendance call is a secondary step: if it fails the employee still
/// exists, so the failure is logged and the created employee returned.
pub async fn create_employee(
    client: &ApiClient,
    request: &CreateEmployeeRequest,
) -> Result<Employee, ClientError> {
    let employee = client.create_employee(request).await?;
    info!("Created employee {} ({})", employee.id, employee.display_name());

    if !employee.has_id() {
        warn!("Backend returned no id for the new employee; skipping attendance log");
        return Ok(employee);
    }

    let attendance = AttendanceLogRequest {
        employee_id: employee.id,
        status: NEW_EMPLOYEE_ATTENDANCE.to_string(),
    };
    if let Err(e) = client.log_attendance(&attendance).await {
        warn!(
            "Attendance log for new employee {} failed: {}",
            employee.id, e
        );
    }

    Ok(employee)
}
