use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FillPolicy {
    pub combobox_blur_delay_ms: u64,
    /// Shortest option label that may match by being contained in the value.
    pub reverse_match_min_len: usize,
}

impl FillPolicy {
    pub fn combobox_blur_delay(&self) -> Duration {
        Duration::from_millis(self.combobox_blur_delay_ms)
    }
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self {
            combobox_blur_delay_ms: 150,
            reverse_match_min_len: 3,
        }
    }
}
