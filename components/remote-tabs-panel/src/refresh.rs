/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Fetching clients and tabs from the sync backend.
//!
//! A refresh is all-or-nothing: a successful fetch replaces the current sections wholesale, a
//! failed one leaves them exactly as they were. Failures are logged and otherwise swallowed; the
//! panel prefers showing stale data over showing an error. There is no retry and no way to cancel
//! a refresh once it has started.
//!
//! Refreshes may overlap. Each one is issued a generation number and only the completion for the
//! most recently issued refresh is applied; earlier ones are discarded when they land.

use crate::error::*;
use crate::hierarchy;
use crate::logging::PanelLogger;
use crate::types::{ClientAndTabs, DisplaySection};
use async_trait::async_trait;
use log::Level;
use parking_lot::Mutex;
use std::sync::Arc;

/// Supplies the clients and tabs known to sync.
#[async_trait]
pub trait SyncBackend: Send + Sync {
    async fn fetch_clients_and_tabs(&self) -> Result<Vec<ClientAndTabs>>;
}

/// The busy spinner (a pull-to-refresh control, typically).
pub trait RefreshIndicator: Send + Sync {
    fn begin_refreshing(&self);
    fn end_refreshing(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
}

/// What we last got from the backend. `Loaded(vec![])` means "the fetch worked and nobody has
/// tabs", which is different from never having fetched at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loaded(Vec<DisplaySection>),
}

/// Handed out by [RefreshController::begin] and consumed by [RefreshController::complete], so
/// each started refresh finishes exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct RefreshTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New sections were stored and reported.
    Updated,
    /// The fetch failed; nothing changed.
    Failed,
    /// The fetch worked but a newer refresh was started in the meantime.
    Superseded,
}

#[derive(Default)]
struct RefreshInner {
    generation: u64,
    in_flight: usize,
    load_state: LoadState,
}

pub struct RefreshController {
    backend: Arc<dyn SyncBackend>,
    indicator: Arc<dyn RefreshIndicator>,
    logger: Arc<dyn PanelLogger>,
    // Never held across an await or while calling out to a collaborator.
    inner: Mutex<RefreshInner>,
}

impl RefreshController {
    pub fn new(
        backend: Arc<dyn SyncBackend>,
        indicator: Arc<dyn RefreshIndicator>,
        logger: Arc<dyn PanelLogger>,
    ) -> Self {
        Self {
            backend,
            indicator,
            logger,
            inner: Mutex::default(),
        }
    }

    pub fn state(&self) -> RefreshState {
        if self.inner.lock().in_flight == 0 {
            RefreshState::Idle
        } else {
            RefreshState::Refreshing
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.inner.lock().load_state.clone()
    }

    /// The sections from the last successful refresh, if there has been one.
    pub fn current_sections(&self) -> Option<Vec<DisplaySection>> {
        match &self.inner.lock().load_state {
            LoadState::Uninitialized => None,
            LoadState::Loaded(sections) => Some(sections.clone()),
        }
    }

    /// Fetch from the backend and, if that works, hand the new sections to `on_update` before
    /// the busy indicator is stopped.
    pub async fn refresh<F>(&self, on_update: F) -> RefreshOutcome
    where
        F: FnOnce(&[DisplaySection]),
    {
        let ticket = self.begin();
        let result = self.backend.fetch_clients_and_tabs().await;
        self.complete(ticket, result, on_update)
    }

    /// First half of [Self::refresh]: mark a refresh as in flight and start the indicator.
    pub fn begin(&self) -> RefreshTicket {
        let (ticket, starting) = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.in_flight += 1;
            (
                RefreshTicket {
                    generation: inner.generation,
                },
                inner.in_flight == 1,
            )
        };
        if starting {
            self.indicator.begin_refreshing();
        }
        ticket
    }

    /// Second half of [Self::refresh]: apply the fetch result for `ticket`.
    pub fn complete<F>(
        &self,
        ticket: RefreshTicket,
        result: Result<Vec<ClientAndTabs>>,
        on_update: F,
    ) -> RefreshOutcome
    where
        F: FnOnce(&[DisplaySection]),
    {
        let outcome = match result {
            Ok(records) => {
                let message = format!("{} tabs fetched.", records.len());
                self.logger.log(Level::Info, &message);
                let sections = {
                    let mut inner = self.inner.lock();
                    if ticket.generation == inner.generation {
                        let sections = hierarchy::build(records);
                        inner.load_state = LoadState::Loaded(sections.clone());
                        Some(sections)
                    } else {
                        log::debug!(
                            "Discarding refresh {} in favor of refresh {}",
                            ticket.generation,
                            inner.generation
                        );
                        None
                    }
                };
                match sections {
                    Some(sections) => {
                        log::debug!("We have {} sections.", sections.len());
                        on_update(&sections);
                        RefreshOutcome::Updated
                    }
                    None => RefreshOutcome::Superseded,
                }
            }
            Err(e) => {
                log::debug!("Remote tabs fetch failed: {}", e);
                self.logger.log(Level::Error, "Failed to fetch tabs.");
                RefreshOutcome::Failed
            }
        };

        // Always end refreshing, even if we failed!
        let finished = {
            let mut inner = self.inner.lock();
            inner.in_flight = inner.in_flight.saturating_sub(1);
            inner.in_flight == 0
        };
        if finished {
            self.indicator.end_refreshing();
        }
        outcome
    }
}
