/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Presentation logic for the "tabs from other devices" panel.
//!
//! The embedding app supplies the collaborators (sync backend, account state, view, navigation)
//! and drives the panel through [RemoteTabsPanel]. Nothing in here knows about a UI toolkit; the
//! view is told which state to render and which side effects to perform.

#![allow(unknown_lints)]
#![warn(rust_2018_idioms)]

mod error;
mod format;
mod hierarchy;
mod logging;
mod panel;
mod presentation;
mod refresh;
mod types;

pub use crate::error::{Error, Result};
pub use crate::format::{
    classify_device, format_last_synced, last_synced_label, DeviceClassification, DeviceIcon,
    SectionHeaderView, TabRowView, DESKTOP_DEVICE_TYPE,
};
pub use crate::hierarchy::build;
pub use crate::logging::{LogFacadeLogger, PanelLogger};
pub use crate::panel::{
    AccountProvider, Clock, PanelCollaborators, PanelNavigator, PanelView, RemoteTabsPanel,
    SystemClock, ROW_ACTIVATION_VISIT_TYPE,
};
pub use crate::presentation::{PanelState, PresentationStateMachine, Transition, ViewEffect};
pub use crate::refresh::{
    LoadState, RefreshController, RefreshIndicator, RefreshOutcome, RefreshState, RefreshTicket,
    SyncBackend,
};
pub use crate::types::{
    clients_and_tabs_from_json, ClientAndTabs, ClientRecord, DisplaySection, TabRecord,
    Timestamp, VisitType,
};
