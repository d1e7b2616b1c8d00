/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Strings and icons for the section headers and rows.

use crate::types::{DisplaySection, TabRecord, Timestamp};
use chrono::{TimeZone, Utc};
use std::time::Duration;

/// The only device type that gets the desktop icon.
pub const DESKTOP_DEVICE_TYPE: &str = "desktop";

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceIcon {
    Desktop,
    Mobile,
}

impl DeviceIcon {
    pub fn asset_name(self) -> &'static str {
        match self {
            DeviceIcon::Desktop => "deviceTypeDesktop",
            DeviceIcon::Mobile => "deviceTypeMobile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceClassification {
    pub icon: DeviceIcon,
    pub accessibility_label: &'static str,
}

/// Anything that isn't exactly "desktop" is a mobile device, including empty and unknown types.
pub fn classify_device(device_type: &str) -> DeviceClassification {
    if device_type == DESKTOP_DEVICE_TYPE {
        DeviceClassification {
            icon: DeviceIcon::Desktop,
            accessibility_label: "computer",
        }
    } else {
        DeviceClassification {
            icon: DeviceIcon::Mobile,
            accessibility_label: "mobile device",
        }
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Describe how long ago `ts` was, relative to `now`.
///
/// Callers pass the client record's modification time, which is only an approximation of when
/// the device last synced (see [crate::ClientAndTabs::approximate_last_sync_time]).
pub fn format_last_synced(ts: Timestamp, now: Timestamp) -> String {
    // A timestamp in the future means the clocks disagree; treat it as current.
    let age = match now.duration_since(ts) {
        Some(age) => age,
        None => return "just now".to_string(),
    };
    let days = age.as_secs() / DAY.as_secs();
    if age < MINUTE {
        "just now".to_string()
    } else if age < HOUR {
        plural(age.as_secs() / MINUTE.as_secs(), "minute")
    } else if age < DAY {
        plural(age.as_secs() / HOUR.as_secs(), "hour")
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        "more than a week ago".to_string()
    } else if days < 60 {
        "more than a month ago".to_string()
    } else {
        absolute_date(ts)
    }
}

// UTC rather than local time, so the result only depends on the inputs.
fn absolute_date(ts: Timestamp) -> String {
    i64::try_from(ts.as_millis())
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "a long time ago".to_string())
}

pub fn last_synced_label(ts: Timestamp, now: Timestamp) -> String {
    format!("Last synced: {}", format_last_synced(ts, now))
}

/// What a section header shows: device name, device icon, and when it last synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeaderView {
    pub title: String,
    pub icon: DeviceIcon,
    pub accessibility_label: String,
    pub detail: String,
}

impl SectionHeaderView {
    pub fn for_section(section: &DisplaySection, now: Timestamp) -> Self {
        let client = section.header();
        let classification = classify_device(&client.device_type);
        Self {
            title: client.name.clone(),
            icon: classification.icon,
            accessibility_label: classification.accessibility_label.to_string(),
            detail: last_synced_label(client.last_modified, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRowView {
    pub title: String,
    pub subtitle: String,
}

impl From<&TabRecord> for TabRowView {
    fn from(tab: &TabRecord) -> Self {
        Self {
            title: tab.title.clone(),
            subtitle: tab.url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build;
    use crate::types::{ClientAndTabs, ClientRecord};
    use url::Url;

    const NOW: u64 = 1_700_000_000_000;
    const MINUTE_MS: u64 = 60 * 1000;
    const HOUR_MS: u64 = 60 * MINUTE_MS;
    const DAY_MS: u64 = 24 * HOUR_MS;

    fn ago(ms: u64) -> String {
        format_last_synced(Timestamp(NOW - ms), Timestamp(NOW))
    }

    #[test]
    fn test_classify_device() {
        assert_eq!(classify_device("desktop").icon, DeviceIcon::Desktop);
        assert_eq!(classify_device("desktop").accessibility_label, "computer");
        for other in &["mobile", "", "tablet", "Desktop", "desktop "] {
            let classification = classify_device(other);
            assert_eq!(classification.icon, DeviceIcon::Mobile, "{:?}", other);
            assert_eq!(classification.accessibility_label, "mobile device");
        }
        assert_eq!(DeviceIcon::Desktop.asset_name(), "deviceTypeDesktop");
        assert_eq!(DeviceIcon::Mobile.asset_name(), "deviceTypeMobile");
    }

    #[test]
    fn test_relative_times() {
        assert_eq!(ago(0), "just now");
        assert_eq!(ago(59 * 1000), "just now");
        assert_eq!(ago(MINUTE_MS), "1 minute ago");
        assert_eq!(ago(45 * MINUTE_MS + 10), "45 minutes ago");
        assert_eq!(ago(HOUR_MS), "1 hour ago");
        assert_eq!(ago(3 * HOUR_MS + 5 * MINUTE_MS), "3 hours ago");
        assert_eq!(ago(DAY_MS), "yesterday");
        assert_eq!(ago(2 * DAY_MS - 1), "yesterday");
        assert_eq!(ago(3 * DAY_MS), "3 days ago");
        assert_eq!(ago(10 * DAY_MS), "more than a week ago");
        assert_eq!(ago(45 * DAY_MS), "more than a month ago");
        // 2023-11-14T22:13:20Z minus 90 days.
        assert_eq!(ago(90 * DAY_MS), "2023-08-16");
    }

    #[test]
    fn test_future_timestamp() {
        assert_eq!(
            format_last_synced(Timestamp(NOW + HOUR_MS), Timestamp(NOW)),
            "just now"
        );
    }

    #[test]
    fn test_deterministic() {
        let ts = Timestamp(NOW - 7 * HOUR_MS);
        assert_eq!(
            format_last_synced(ts, Timestamp(NOW)),
            format_last_synced(ts, Timestamp(NOW))
        );
        assert_eq!(
            last_synced_label(ts, Timestamp(NOW)),
            "Last synced: 7 hours ago"
        );
    }

    #[test]
    fn test_view_models() {
        let sections = build(vec![ClientAndTabs {
            client: ClientRecord {
                id: "id".to_string(),
                name: "Work laptop".to_string(),
                device_type: "desktop".to_string(),
                last_modified: Timestamp(NOW - 2 * HOUR_MS),
            },
            tabs: vec![TabRecord {
                title: "Mozilla".to_string(),
                url: Url::parse("https://www.mozilla.org/en-US/").unwrap(),
                last_used: Timestamp(NOW - 3 * HOUR_MS),
            }],
        }]);
        let header = SectionHeaderView::for_section(&sections[0], Timestamp(NOW));
        assert_eq!(
            header,
            SectionHeaderView {
                title: "Work laptop".to_string(),
                icon: DeviceIcon::Desktop,
                accessibility_label: "computer".to_string(),
                detail: "Last synced: 2 hours ago".to_string(),
            }
        );
        let row = TabRowView::from(&sections[0].rows()[0]);
        assert_eq!(row.title, "Mozilla");
        assert_eq!(row.subtitle, "https://www.mozilla.org/en-US/");
    }
}
