/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The sync backend could not supply clients and tabs.
    #[error("Error fetching remote tabs: {reason}")]
    Backend { reason: String },

    #[error("Error parsing JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn backend(reason: impl Into<String>) -> Self {
        Error::Backend {
            reason: reason.into(),
        }
    }
}
