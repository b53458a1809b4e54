//! Presentation state for the agency browser.
//!
//! [`Controller`] is the single owner of the fetched records and of the
//! [`UiState`]. All mutation goes through its transition methods; renderers
//! only ever see a shared reference or a [`View`] projection.

use agency_client::FetchError;
use agency_core::{group_by_niche, AgencyRecord, RecordKey, SortMode};

use crate::view::{project, View};

/// Selection, expansion, sort and menu state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub selected_niche: Option<String>,
    /// At most one record is expanded at a time.
    pub expanded: Option<RecordKey>,
    pub sort_mode: SortMode,
    pub menu_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_niche: None,
            expanded: None,
            sort_mode: SortMode::Pricing,
            menu_visible: true,
        }
    }
}

/// Tags an in-flight load so a superseded response can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What [`Controller::apply_load`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    Failed,
    /// The ticket was stale or cancelled; state is untouched.
    Discarded,
}

#[derive(Debug, Default)]
pub struct Controller {
    records: Vec<AgencyRecord>,
    state: UiState,
    generation: u64,
    pending: Option<LoadTicket>,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub fn records(&self) -> &[AgencyRecord] {
        &self.records
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Projects the current state for rendering.
    #[must_use]
    pub fn view(&self) -> View<'_> {
        project(&self.records, &self.state, self.is_loading())
    }

    /// Starts a new load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        self.pending = Some(ticket);
        ticket
    }

    /// Invalidates the in-flight load so its response is dropped on arrival.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            self.generation += 1;
            tracing::debug!(generation = self.generation, "pending agency load cancelled");
        }
    }

    /// Applies the response for `ticket`.
    ///
    /// On success the records are stored and, if nothing is selected yet, the
    /// first niche in fetch order becomes the selection. A failure is logged
    /// and otherwise leaves the state as it was.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<AgencyRecord>, FetchError>,
    ) -> LoadOutcome {
        if self.pending != Some(ticket) {
            tracing::debug!(?ticket, "discarding stale agency load");
            return LoadOutcome::Discarded;
        }
        self.pending = None;

        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                if self.state.selected_niche.is_none() {
                    self.state.selected_niche =
                        group_by_niche(&self.records).first_key().map(str::to_owned);
                }
                tracing::info!(
                    count,
                    niche = self.state.selected_niche.as_deref().unwrap_or(""),
                    "agencies loaded"
                );
                LoadOutcome::Applied { count }
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching data");
                LoadOutcome::Failed
            }
        }
    }

    /// Selects `niche`, hides the menu and collapses any expanded record.
    ///
    /// Returns `false` (and changes nothing) if `niche` is not a current key.
    pub fn pick_niche(&mut self, niche: &str) -> bool {
        if !group_by_niche(&self.records).contains(niche) {
            tracing::debug!(niche, "ignoring pick of unknown niche");
            return false;
        }
        self.state.selected_niche = Some(niche.to_owned());
        self.state.menu_visible = false;
        self.state.expanded = None;
        true
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.state.sort_mode = mode;
    }

    /// Expands `key`, or collapses it if it is already expanded.
    pub fn toggle_agency(&mut self, key: RecordKey) {
        self.state.expanded = if self.state.expanded == Some(key) {
            None
        } else {
            Some(key)
        };
    }

    /// Makes the niche menu visible again.
    pub fn open_menu(&mut self) {
        self.state.menu_visible = true;
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
