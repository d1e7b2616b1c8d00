/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::error::*;
use serde_derive::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use url::Url;

/// Milliseconds since the unix epoch, as reported by the sync server.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Default,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn now() -> Self {
        SystemTime::now().into()
    }

    /// Returns None if `other` is later than `self`.
    #[inline]
    pub fn duration_since(self, other: Timestamp) -> Option<Duration> {
        self.0.checked_sub(other.0).map(Duration::from_millis)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl From<SystemTime> for Timestamp {
    #[inline]
    fn from(st: SystemTime) -> Self {
        // Clocks before the epoch clamp to zero.
        let d = st.duration_since(UNIX_EPOCH).unwrap_or_default();
        Timestamp(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// A remote device known to the sync backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    /// Free-form; only "desktop" is treated specially.
    #[serde(default)]
    pub device_type: String,
    /// When the client record itself was last modified. Also bumped when another device sends
    /// this one a command, so it is *not* the last time the tabs were synced.
    pub last_modified: Timestamp,
}

/// One open tab on a remote device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    pub title: String,
    pub url: Url,
    pub last_used: Timestamp,
}

/// A remote device and the tabs it has open, in the order the device reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAndTabs {
    pub client: ClientRecord,
    #[serde(default)]
    pub tabs: Vec<TabRecord>,
}

impl ClientAndTabs {
    /// The best guess we have at when this client last synced, which is just the client record's
    /// modification time. Neither it nor the tab timestamps are the real "last synced" time; what
    /// we'd actually want is the modified time of the tabs record.
    pub fn approximate_last_sync_time(&self) -> Timestamp {
        self.client.last_modified
    }
}

/// Parse the JSON array of `ClientAndTabs` a backend (or a test fixture) hands us.
pub fn clients_and_tabs_from_json(json: &str) -> Result<Vec<ClientAndTabs>> {
    Ok(serde_json::from_str(json)?)
}

/// A device and its tabs as shown in the panel. Only exists for devices with at least one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySection {
    header: ClientRecord,
    rows: Vec<TabRecord>,
}

impl DisplaySection {
    pub(crate) fn new(header: ClientRecord, rows: Vec<TabRecord>) -> Option<Self> {
        if rows.is_empty() {
            None
        } else {
            Some(Self { header, rows })
        }
    }

    pub fn header(&self) -> &ClientRecord {
        &self.header
    }

    /// Never empty.
    pub fn rows(&self) -> &[TabRecord] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&TabRecord> {
        self.rows.get(index)
    }
}

/// How a URL was reached, as recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitType {
    Link,
    Typed,
    Bookmark,
}
