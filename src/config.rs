//! Configuration file model.
//!
//! Every field has a default, so an absent or partial YAML file is valid.

use std::path::PathBuf;

use autofill_flow::AutofillPolicy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile used when a command is not given `--profile`.
    pub profile_path: Option<PathBuf>,
    pub settle_delay_ms: u64,
    pub mutation_debounce_ms: u64,
    pub combobox_blur_delay_ms: u64,
    pub toast_duration_ms: u64,
    pub supported_hosts: Vec<String>,
    pub question_markers: Vec<String>,
    pub dynamic_markers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let policy = AutofillPolicy::default();
        Self {
            profile_path: None,
            settle_delay_ms: policy.settle_delay_ms,
            mutation_debounce_ms: policy.mutation_debounce_ms,
            combobox_blur_delay_ms: policy.fill.combobox_blur_delay_ms,
            toast_duration_ms: policy.toast_duration_ms,
            supported_hosts: policy.supported_hosts,
            question_markers: policy.question_markers,
            dynamic_markers: policy.dynamic_markers,
        }
    }
}

impl Config {
    pub fn policy(&self) -> AutofillPolicy {
        let mut policy = AutofillPolicy {
            question_markers: self.question_markers.clone(),
            dynamic_markers: self.dynamic_markers.clone(),
            supported_hosts: self.supported_hosts.clone(),
            settle_delay_ms: self.settle_delay_ms,
            mutation_debounce_ms: self.mutation_debounce_ms,
            toast_duration_ms: self.toast_duration_ms,
            ..AutofillPolicy::default()
        };
        policy.fill.combobox_blur_delay_ms = self.combobox_blur_delay_ms;
        policy
    }
}
