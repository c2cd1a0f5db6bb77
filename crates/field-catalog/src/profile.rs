//! The user's saved answers.
//!
//! A profile is a flat map from a known key to a string, a boolean or a list
//! of availability slots. It is written by the settings surface and only ever
//! read by the engine.

use std::collections::BTreeMap;

use autofiller_core_types::AutofillError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::field::SemanticField;

pub const TEXT_OPT_IN: &str = "textOptIn";
pub const PRIVACY_POLICY: &str = "privacyPolicy";
pub const AUTO_FILL_ON_LOAD: &str = "autoFillOnLoad";
pub const SHOW_NOTIFICATION: &str = "showNotification";
pub const FILL_DEMOGRAPHICS: &str = "fillDemographics";
pub const AUTO_FILL_DATE: &str = "autoFillDate";
const CITY_STATE: &str = "cityState";

/// Keys that are not tied to a catalog field.
const EXTRA_KEYS: &[&str] = &[
    TEXT_OPT_IN,
    PRIVACY_POLICY,
    AUTO_FILL_ON_LOAD,
    SHOW_NOTIFICATION,
    FILL_DEMOGRAPHICS,
    AUTO_FILL_DATE,
];

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile could not be decoded: {0}")]
    Decode(String),
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

impl From<ProfileError> for AutofillError {
    fn from(err: ProfileError) -> Self {
        AutofillError::profile(err.to_string())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::Decode(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    pub time: String,
}

impl AvailabilitySlot {
    pub fn new(day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileValue {
    Flag(bool),
    Count(i64),
    Text(String),
    Slots(Vec<AvailabilitySlot>),
}

impl From<&str> for ProfileValue {
    fn from(value: &str) -> Self {
        ProfileValue::Text(value.to_string())
    }
}

impl From<String> for ProfileValue {
    fn from(value: String) -> Self {
        ProfileValue::Text(value)
    }
}

impl From<i64> for ProfileValue {
    fn from(value: i64) -> Self {
        ProfileValue::Count(value)
    }
}

impl From<bool> for ProfileValue {
    fn from(value: bool) -> Self {
        ProfileValue::Flag(value)
    }
}

impl From<Vec<AvailabilitySlot>> for ProfileValue {
    fn from(value: Vec<AvailabilitySlot>) -> Self {
        ProfileValue::Slots(value)
    }
}

/// Engine toggles carried inside the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub fill_demographics: bool,
    pub auto_fill_date: bool,
    pub show_notification: bool,
    pub auto_fill_on_load: bool,
    pub text_opt_in: bool,
    pub privacy_policy: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fill_demographics: false,
            auto_fill_date: true,
            show_notification: true,
            auto_fill_on_load: false,
            text_opt_in: false,
            privacy_policy: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, ProfileValue>", into = "BTreeMap<String, ProfileValue>")]
pub struct ProfileRecord {
    values: BTreeMap<String, ProfileValue>,
}

impl From<BTreeMap<String, ProfileValue>> for ProfileRecord {
    fn from(raw: BTreeMap<String, ProfileValue>) -> Self {
        Self::from_map(raw)
    }
}

impl From<ProfileRecord> for BTreeMap<String, ProfileValue> {
    fn from(record: ProfileRecord) -> Self {
        record.values
    }
}

impl ProfileRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_known_key(key: &str) -> bool {
        EXTRA_KEYS.contains(&key) || known_field_keys().any(|known| known == key)
    }

    /// Keeps only known keys.
    pub fn from_map(raw: BTreeMap<String, ProfileValue>) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            if Self::is_known_key(&key) {
                values.insert(key, value);
            } else {
                debug!(key = %key, "dropping unknown profile key");
            }
        }
        Self { values }
    }

    pub fn from_json(raw: &str) -> Result<Self, ProfileError> {
        let map: BTreeMap<String, ProfileValue> = serde_json::from_str(raw)?;
        Ok(Self::from_map(map))
    }

    pub fn with(mut self, key: &str, value: impl Into<ProfileValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<ProfileValue>) {
        if !Self::is_known_key(key) {
            debug!(key, "ignoring unknown profile key");
            return;
        }
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ProfileValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-empty trimmed text for `key`. Booleans read as `"Yes"`/`"No"`.
    /// A missing `cityState` is derived from `city` and `state`.
    pub fn text(&self, key: &str) -> Option<String> {
        let stored = self.values.get(key).and_then(|value| match value {
            ProfileValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            ProfileValue::Flag(flag) => Some(if *flag { "Yes" } else { "No" }.to_string()),
            ProfileValue::Count(count) => Some(count.to_string()),
            ProfileValue::Slots(_) => None,
        });
        match stored {
            None if key == CITY_STATE => self.derived_city_state(),
            stored => stored,
        }
    }

    pub fn field_text(&self, field: SemanticField) -> Option<String> {
        field.profile_key().and_then(|key| self.text(key))
    }

    /// Availability slots; the text form `"Monday: Morning; Tuesday: Evening"`
    /// is accepted too.
    pub fn slots(&self, key: &str) -> Vec<AvailabilitySlot> {
        match self.values.get(key) {
            Some(ProfileValue::Slots(slots)) => slots
                .iter()
                .filter(|slot| !slot.day.trim().is_empty())
                .cloned()
                .collect(),
            Some(ProfileValue::Text(text)) => parse_slots(text),
            _ => Vec::new(),
        }
    }

    /// Boolean view of `key`; `"yes"`/`"true"` strings count as set.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            ProfileValue::Flag(flag) => Some(*flag),
            ProfileValue::Text(text) => {
                let text = text.trim().to_ascii_lowercase();
                match text.as_str() {
                    "yes" | "true" | "on" | "1" => Some(true),
                    "no" | "false" | "off" | "0" => Some(false),
                    _ => None,
                }
            }
            ProfileValue::Count(_) | ProfileValue::Slots(_) => None,
        }
    }

    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            fill_demographics: self
                .flag(FILL_DEMOGRAPHICS)
                .unwrap_or(defaults.fill_demographics),
            auto_fill_date: self.flag(AUTO_FILL_DATE).unwrap_or(defaults.auto_fill_date),
            show_notification: self
                .flag(SHOW_NOTIFICATION)
                .unwrap_or(defaults.show_notification),
            auto_fill_on_load: self
                .flag(AUTO_FILL_ON_LOAD)
                .unwrap_or(defaults.auto_fill_on_load),
            text_opt_in: self.flag(TEXT_OPT_IN).unwrap_or(false),
            privacy_policy: self.flag(PRIVACY_POLICY).unwrap_or(false),
        }
    }

    pub fn subset<S: AsRef<str>>(&self, keys: &[S]) -> ProfileRecord {
        let values = keys
            .iter()
            .filter_map(|key| {
                self.values
                    .get_key_value(key.as_ref())
                    .map(|(k, v)| (k.clone(), v.clone()))
            })
            .collect();
        ProfileRecord { values }
    }

    /// `"City, ST"`, or just the city when no state is saved.
    fn derived_city_state(&self) -> Option<String> {
        let city = self.text("city")?;
        Some(match self.text("state") {
            Some(state) => format!("{city}, {state}"),
            None => city,
        })
    }
}

fn known_field_keys() -> impl Iterator<Item = &'static str> {
    use SemanticField::*;
    [
        Phone,
        Email,
        Address,
        City,
        CityState,
        State,
        ZipCode,
        Country,
        JobTitle,
        CompanyName,
        MiddleName,
        DegreeMajor,
        SecurityClearanceLevel,
        YearsOfSoftwareDevelopment,
        YearsOfOop,
        YearsOfPhp,
        YearsOfSoftwareArchitecture,
        YearsOfLeadership,
        YearsOfTechnicalDrawing,
        YearsOfRequirementsGathering,
        YearsOfJavaScript,
        YearsOfB2bEcommerce,
        AvailableTimes,
        LinkedinUrl,
        GithubUrl,
        AuthorizedToWork,
        RequireSponsorship,
        OverAge18,
        EducationLevel,
        SecurityClearance,
        BackgroundCheck,
        ReferralQuestion,
        Acknowledgment,
        FullName,
        Gender,
        Ethnicity,
        VeteranStatus,
        DisabilityStatus,
    ]
    .into_iter()
    .filter_map(SemanticField::profile_key)
}

fn parse_slots(raw: &str) -> Vec<AvailabilitySlot> {
    raw.split([';', '\n'])
        .filter_map(|chunk| {
            let (day, time) = chunk.split_once(':')?;
            let (day, time) = (day.trim(), time.trim());
            (!day.is_empty() && !time.is_empty()).then(|| AvailabilitySlot::new(day, time))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_dropped() {
        let raw = r#"{"phone":"555-0100","favouriteColour":"teal"}"#;
        let record = ProfileRecord::from_json(raw).unwrap();
        assert_eq!(record.text("phone").as_deref(), Some("555-0100"));
        assert!(record.get("favouriteColour").is_none());
    }

    #[test]
    fn install_defaults_apply_to_absent_flags() {
        let settings = ProfileRecord::new().settings();
        assert!(settings.show_notification);
        assert!(settings.auto_fill_date);
        assert!(!settings.fill_demographics);
        assert!(!settings.auto_fill_on_load);
    }

    #[test]
    fn opt_in_flags_accept_yes_strings() {
        let record = ProfileRecord::new()
            .with(TEXT_OPT_IN, "Yes")
            .with(PRIVACY_POLICY, true)
            .with(FILL_DEMOGRAPHICS, "no");
        let settings = record.settings();
        assert!(settings.text_opt_in);
        assert!(settings.privacy_policy);
        assert!(!settings.fill_demographics);
    }

    #[test]
    fn city_state_is_derived() {
        let record = ProfileRecord::new().with("city", "Austin").with("state", "TX");
        assert_eq!(record.text("cityState").as_deref(), Some("Austin, TX"));

        let only_city = ProfileRecord::new().with("city", "Austin");
        assert_eq!(only_city.text("cityState").as_deref(), Some("Austin"));

        let explicit = ProfileRecord::new()
            .with("cityState", "Round Rock, TX")
            .with("city", "Austin");
        assert_eq!(explicit.text("cityState").as_deref(), Some("Round Rock, TX"));

        let state_first = ProfileRecord::new().with("state", "TX").with("city", "Austin");
        assert_eq!(state_first.text("cityState").as_deref(), Some("Austin, TX"));

        let mut moved = ProfileRecord::new().with("city", "Austin").with("state", "TX");
        moved.set("city", "Dallas");
        assert_eq!(moved.text("cityState").as_deref(), Some("Dallas, TX"));

        let blank = ProfileRecord::new().with("cityState", " ").with("city", "Austin");
        assert_eq!(blank.text("cityState").as_deref(), Some("Austin"));
        assert_eq!(ProfileRecord::new().with("state", "TX").text("cityState"), None);
    }

    #[test]
    fn blank_text_is_absent_and_booleans_read_as_answers() {
        let record = ProfileRecord::new()
            .with("jobTitle", "   ")
            .with("authorizedToWork", true);
        assert_eq!(record.text("jobTitle"), None);
        assert_eq!(record.text("authorizedToWork").as_deref(), Some("Yes"));
    }

    #[test]
    fn numeric_years_read_as_text() {
        let record = ProfileRecord::from_json(r#"{"yearsOfPHP":5}"#).unwrap();
        assert_eq!(record.text("yearsOfPHP").as_deref(), Some("5"));
    }

    #[test]
    fn availability_accepts_both_forms() {
        let json = r#"{"availableTimes":[{"day":"Monday","time":"Morning"},{"day":"Friday","time":"Evening"}]}"#;
        let record = ProfileRecord::from_json(json).unwrap();
        assert_eq!(record.slots("availableTimes").len(), 2);

        let text = ProfileRecord::new().with("availableTimes", "Monday: Morning; Tuesday: Evening");
        assert_eq!(
            text.slots("availableTimes"),
            vec![
                AvailabilitySlot::new("Monday", "Morning"),
                AvailabilitySlot::new("Tuesday", "Evening"),
            ]
        );
    }

    #[test]
    fn subset_keeps_requested_keys() {
        let record = ProfileRecord::new()
            .with("phone", "1")
            .with("email", "a@b.c")
            .with("city", "Austin");
        let subset = record.subset(&["phone", "missing"]);
        assert_eq!(subset.len(), 1);
        assert!(subset.get("phone").is_some());
    }

    #[test]
    fn yaml_profiles_deserialize() {
        let yaml = "phone: '555'\nfillDemographics: true\nveteranStatus: '51'\n";
        let record: ProfileRecord = serde_yaml::from_str(yaml).unwrap();
        assert!(record.settings().fill_demographics);
        assert_eq!(record.text("veteranStatus").as_deref(), Some("51"));
    }
}
