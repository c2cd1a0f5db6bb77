use std::time::Duration;

use serde::{Deserialize, Serialize};
use widget_fillers::FillPolicy;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillPolicy {
    /// Class substrings identifying a question wrapper.
    pub question_markers: Vec<String>,
    /// Class substrings of inserted nodes that warrant a new pass.
    pub dynamic_markers: Vec<String>,
    /// Hosts (and their subdomains) where the shortcut is honoured.
    pub supported_hosts: Vec<String>,
    pub settle_delay_ms: u64,
    pub mutation_debounce_ms: u64,
    pub toast_duration_ms: u64,
    pub fill: FillPolicy,
}

impl AutofillPolicy {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn mutation_debounce(&self) -> Duration {
        Duration::from_millis(self.mutation_debounce_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn host_supported(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.supported_hosts.iter().any(|allowed| {
            let allowed = allowed.to_ascii_lowercase();
            host == allowed || host.ends_with(&format!(".{allowed}"))
        })
    }
}

impl Default for AutofillPolicy {
    fn default() -> Self {
        Self {
            question_markers: vec!["Questions-item".to_string()],
            dynamic_markers: vec!["Questions-item".to_string(), "ia-Questions".to_string()],
            supported_hosts: vec!["indeed.com".to_string()],
            settle_delay_ms: 1000,
            mutation_debounce_ms: 500,
            toast_duration_ms: 3000,
            fill: FillPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdomains_are_supported() {
        let policy = AutofillPolicy::default();
        assert!(policy.host_supported("indeed.com"));
        assert!(policy.host_supported("smartapply.indeed.com"));
        assert!(!policy.host_supported("notindeed.com"));
        assert!(!policy.host_supported("example.org"));
    }
}
