/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use log::Level;

/// Where the panel reports fetch results. Messages carry counts only, never names or URLs.
pub trait PanelLogger: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Forwards to whatever logger the app installed for the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacadeLogger;

impl PanelLogger for LogFacadeLogger {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: "remote_tabs_panel", level, "{}", message);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    pub struct RecordingLogger {
        pub entries: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingLogger {
        pub fn take(&self) -> Vec<(Level, String)> {
            std::mem::take(&mut *self.entries.lock())
        }
    }

    impl PanelLogger for RecordingLogger {
        fn log(&self, level: Level, message: &str) {
            self.entries.lock().push((level, message.to_string()));
        }
    }
}
