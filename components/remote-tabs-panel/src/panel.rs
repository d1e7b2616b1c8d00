/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The adapter an embedding app talks to.
//!
//! [RemoteTabsPanel] wires the refresh controller and the presentation state machine to the
//! app's collaborators. The app calls [RemoteTabsPanel::activate] whenever the panel comes on
//! screen and [RemoteTabsPanel::refresh] on pull-to-refresh, and reads rows and headers back
//! through the data-source methods.

use crate::format::{SectionHeaderView, TabRowView};
use crate::logging::PanelLogger;
use crate::presentation::{PanelState, PresentationStateMachine, Transition, ViewEffect};
use crate::refresh::{RefreshController, RefreshIndicator, RefreshOutcome, SyncBackend};
use crate::types::{DisplaySection, TabRecord, Timestamp, VisitType};
use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;

/// Remote tabs aren't bookmarks, so opening one counts as typing the URL (which means it shows
/// up in history, too).
pub const ROW_ACTIVATION_VISIT_TYPE: VisitType = VisitType::Typed;

pub trait AccountProvider: Send + Sync {
    fn has_account(&self) -> bool;
}

/// Renders the panel.
pub trait PanelView: Send + Sync {
    fn apply_effects(&self, effects: &[ViewEffect]);
    /// Only called with a state to show. Signing in before anything has loaded leaves the panel
    /// with no state yet: the only signal is [ViewEffect::RemoveNoAccountOverlay], after which
    /// the view should stop rendering the sign-in state and wait for the refresh.
    fn state_changed(&self, state: &PanelState);
}

/// Where the panel sends the user next.
pub trait PanelNavigator: Send + Sync {
    fn did_select_url(&self, url: &Url, visit_type: VisitType);
    fn did_request_sign_in(&self);
    fn did_request_create_account(&self);
}

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let ms = chrono::Utc::now().timestamp_millis();
        Timestamp(u64::try_from(ms).unwrap_or_default())
    }
}

pub struct PanelCollaborators {
    pub backend: Arc<dyn SyncBackend>,
    pub account: Arc<dyn AccountProvider>,
    pub indicator: Arc<dyn RefreshIndicator>,
    pub logger: Arc<dyn PanelLogger>,
    pub view: Arc<dyn PanelView>,
    pub navigator: Arc<dyn PanelNavigator>,
    pub clock: Arc<dyn Clock>,
}

pub struct RemoteTabsPanel {
    account: Arc<dyn AccountProvider>,
    view: Arc<dyn PanelView>,
    navigator: Arc<dyn PanelNavigator>,
    clock: Arc<dyn Clock>,
    refresher: RefreshController,
    machine: Mutex<PresentationStateMachine>,
}

impl RemoteTabsPanel {
    pub fn new(collaborators: PanelCollaborators) -> Self {
        let PanelCollaborators {
            backend,
            account,
            indicator,
            logger,
            view,
            navigator,
            clock,
        } = collaborators;
        Self {
            account,
            view,
            navigator,
            clock,
            refresher: RefreshController::new(backend, indicator, logger),
            machine: Mutex::new(PresentationStateMachine::new()),
        }
    }

    /// The panel is about to be shown. Returns the refresh outcome when signed in, `None` when
    /// there's no account (in which case nothing is fetched).
    pub async fn activate(&self) -> Option<RefreshOutcome> {
        let has_account = self.account.has_account();
        let loaded = self.refresher.load_state();
        let transition = self.machine.lock().on_activation(has_account, &loaded);
        if self.apply(transition) {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    /// Fetch again, e.g. from pull-to-refresh.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.refresher
            .refresh(|sections| {
                let transition = self.machine.lock().on_sections(sections);
                self.apply(transition);
            })
            .await
    }

    // Returns whether the transition asked for a refresh.
    fn apply(&self, transition: Transition) -> bool {
        if !transition.effects.is_empty() {
            self.view.apply_effects(&transition.effects);
        }
        if let Some(state) = &transition.state {
            self.view.state_changed(state);
        }
        transition.refresh
    }

    pub fn state(&self) -> Option<PanelState> {
        self.machine.lock().state().cloned()
    }

    pub fn refresher(&self) -> &RefreshController {
        &self.refresher
    }

    fn with_section<T>(&self, section: usize, f: impl FnOnce(&DisplaySection) -> T) -> Option<T> {
        self.machine.lock().sections().get(section).map(f)
    }

    pub fn number_of_sections(&self) -> usize {
        self.machine.lock().sections().len()
    }

    pub fn number_of_rows(&self, section: usize) -> usize {
        self.with_section(section, |s| s.rows().len()).unwrap_or_default()
    }

    pub fn section_header(&self, section: usize) -> Option<SectionHeaderView> {
        let now = self.clock.now();
        self.with_section(section, |s| SectionHeaderView::for_section(s, now))
    }

    pub fn tab_at(&self, section: usize, row: usize) -> Option<TabRecord> {
        self.with_section(section, |s| s.row(row).cloned()).flatten()
    }

    pub fn tab_row(&self, section: usize, row: usize) -> Option<TabRowView> {
        self.tab_at(section, row).as_ref().map(TabRowView::from)
    }

    /// The user tapped a row. Returns false if the row doesn't exist (any more).
    pub fn select_row(&self, section: usize, row: usize) -> bool {
        match self.tab_at(section, row) {
            Some(tab) => {
                self.navigator.did_select_url(&tab.url, ROW_ACTIVATION_VISIT_TYPE);
                true
            }
            None => {
                log::warn!("No tab at section {} row {}", section, row);
                false
            }
        }
    }

    pub fn sign_in(&self) {
        self.navigator.did_request_sign_in();
    }

    pub fn create_account(&self) {
        self.navigator.did_request_create_account();
    }
}
