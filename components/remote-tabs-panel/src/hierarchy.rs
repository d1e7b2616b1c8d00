/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Turns the flat fetch result into the tree the panel displays:
//!
//! ```text
//! client
//!   tab
//!   tab
//! client
//!   tab
//! ```
//!
//! Clients without tabs are dropped. Everything else keeps the order the backend gave us.

use crate::types::{ClientAndTabs, DisplaySection};

pub fn build(records: impl IntoIterator<Item = ClientAndTabs>) -> Vec<DisplaySection> {
    records
        .into_iter()
        .filter_map(|ClientAndTabs { client, tabs }| DisplaySection::new(client, tabs))
        .collect()
}
