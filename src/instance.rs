/// Data structures for monitored review servers
use serde::{Deserialize, Serialize};

/// A review server the extension polls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Instance {
    /// URL origin, e.g. `https://chromium-review.googlesource.com`
    pub host: String,
    /// Display label
    pub name: String,
    pub enabled: bool,
}

impl Instance {
    pub fn new(host: impl Into<String>, name: impl Into<String>, enabled: bool) -> Instance {
        Instance {
            host: host.into(),
            name: name.into(),
            enabled,
        }
    }
}
