//! Field Resolver: first catalog entry that matches the label and yields a
//! non-empty value.

use std::sync::Arc;

use field_catalog::{
    AvailabilitySlot, Catalog, CatalogEntry, ProfileRecord, SemanticField, Settings, WidgetKind,
    CATALOG,
};
use page_dom::normalize_text;
use serde::Serialize;
use tracing::{debug, trace};

use crate::ports::{format_date, Clock, SystemClock};

pub const DEFAULT_COUNTRY: &str = "United States";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    Text(String),
    Slots(Vec<AvailabilitySlot>),
}

impl ResolvedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResolvedValue::Text(text) => Some(text),
            ResolvedValue::Slots(_) => None,
        }
    }

    pub fn slots(&self) -> &[AvailabilitySlot] {
        match self {
            ResolvedValue::Slots(slots) => slots,
            ResolvedValue::Text(_) => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub entry: CatalogEntry,
    pub value: ResolvedValue,
}

impl Resolution {
    pub fn field(&self) -> SemanticField {
        self.entry.field
    }

    pub fn widget(&self) -> WidgetKind {
        self.entry.widget
    }
}

#[derive(Clone)]
pub struct FieldResolver {
    catalog: &'static Catalog,
    clock: Arc<dyn Clock>,
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl FieldResolver {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: &CATALOG,
            clock,
        }
    }

    pub fn with_catalog(mut self, catalog: &'static Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Scans the catalog in order. Gated entries are skipped when demographic
    /// fill is off, and entries that resolve to nothing let the scan go on.
    pub fn resolve(&self, label: &str, profile: &ProfileRecord) -> Option<Resolution> {
        let label = normalize_text(label);
        if label.is_empty() {
            return None;
        }
        let settings = profile.settings();
        for entry in self.catalog.matching(&label) {
            if entry.demographic && !settings.fill_demographics {
                trace!(pattern = entry.pattern, "demographic entry gated off");
                continue;
            }
            match self.value_for(entry, profile, &settings) {
                Some(value) => {
                    debug!(
                        label = %label,
                        pattern = entry.pattern,
                        field = %entry.field,
                        widget = entry.widget.label(),
                        "label resolved"
                    );
                    return Some(Resolution {
                        entry: *entry,
                        value,
                    });
                }
                None => trace!(pattern = entry.pattern, "matched entry has no value"),
            }
        }
        None
    }

    pub fn today(&self) -> String {
        format_date(self.clock.today())
    }

    fn value_for(
        &self,
        entry: &CatalogEntry,
        profile: &ProfileRecord,
        settings: &Settings,
    ) -> Option<ResolvedValue> {
        if let Some(fixed) = entry.fixed_value {
            return Some(ResolvedValue::Text(fixed.to_string()));
        }
        match entry.field {
            SemanticField::TodayDate => settings
                .auto_fill_date
                .then(|| ResolvedValue::Text(self.today())),
            SemanticField::Country => Some(ResolvedValue::Text(
                profile
                    .field_text(SemanticField::Country)
                    .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            )),
            SemanticField::AvailableTimes => {
                let slots = profile.slots("availableTimes");
                (!slots.is_empty()).then_some(ResolvedValue::Slots(slots))
            }
            field => profile.field_text(field).map(ResolvedValue::Text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FixedClock;
    use chrono::NaiveDate;
    use field_catalog::AliasTable;

    fn resolver() -> FieldResolver {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        FieldResolver::new(Arc::new(FixedClock(date)))
    }

    #[test]
    fn clearance_level_takes_the_select_path() {
        let profile = ProfileRecord::new().with("securityClearanceLevel", "secret");
        let resolution = resolver()
            .resolve("DoD Security Clearance Level", &profile)
            .unwrap();
        assert_eq!(resolution.field(), SemanticField::SecurityClearanceLevel);
        assert_eq!(resolution.widget(), WidgetKind::Select(None));
        assert_eq!(resolution.value.as_text(), Some("secret"));
    }

    #[test]
    fn empty_value_continues_the_scan() {
        let profile = ProfileRecord::new().with("securityClearance", "Yes");
        let resolution = resolver()
            .resolve("dod security clearance level", &profile)
            .unwrap();
        assert_eq!(resolution.field(), SemanticField::SecurityClearance);
        assert_eq!(resolution.widget(), WidgetKind::Radio(None));
    }

    #[test]
    fn sponsorship_is_always_no() {
        let profile = ProfileRecord::new().with("requireSponsorship", "Yes");
        let resolution = resolver()
            .resolve(
                "Will you now or in the future require sponsorship for employment visa status?",
                &profile,
            )
            .unwrap();
        assert_eq!(resolution.value.as_text(), Some("No"));
    }

    #[test]
    fn demographic_gating() {
        let gated = ProfileRecord::new().with("veteranStatus", "51");
        assert!(resolver().resolve("veteran status", &gated).is_none());

        let enabled = gated.clone().with("fillDemographics", true);
        let resolution = resolver().resolve("veteran status", &enabled).unwrap();
        assert_eq!(
            resolution.widget(),
            WidgetKind::Radio(Some(AliasTable::Veteran))
        );
        assert_eq!(resolution.value.as_text(), Some("51"));
    }

    #[test]
    fn today_respects_auto_fill_date() {
        let profile = ProfileRecord::new().with("fillDemographics", true);
        let resolution = resolver().resolve("Today's Date", &profile).unwrap();
        assert_eq!(resolution.value.as_text(), Some("01/05/2024"));

        let off = profile.with("autoFillDate", false);
        assert!(resolver().resolve("Today's Date", &off).is_none());
    }

    #[test]
    fn country_defaults() {
        let resolution = resolver()
            .resolve("Country", &ProfileRecord::new())
            .unwrap();
        assert_eq!(resolution.value.as_text(), Some(DEFAULT_COUNTRY));
    }

    #[test]
    fn availability_resolves_to_slots() {
        let profile = ProfileRecord::new().with("availableTimes", "Monday: Morning");
        let resolution = resolver()
            .resolve("Please list your availability", &profile)
            .unwrap();
        assert_eq!(resolution.value.slots().len(), 1);
        assert!(resolver()
            .resolve("Please list your availability", &ProfileRecord::new())
            .is_none());
    }

    #[test]
    fn unmatched_and_blank_labels() {
        let profile = ProfileRecord::new().with("phone", "555");
        assert!(resolver().resolve("favourite colour", &profile).is_none());
        assert!(resolver().resolve("   ", &profile).is_none());
    }

    #[test]
    fn embedded_short_words_do_not_resolve() {
        let profile = ProfileRecord::new()
            .with("yearsOfOOP", 7_i64)
            .with("city", "Austin");
        assert!(resolver()
            .resolve("How many years of Hadoop experience do you have?", &profile)
            .is_none());
        assert!(resolver().resolve("Ethnicity", &profile).is_none());
        let city = resolver().resolve("City", &profile).unwrap();
        assert_eq!(city.field(), SemanticField::City);
    }

    #[test]
    fn resolution_serializes() {
        let profile = ProfileRecord::new().with("phone", "555-0100");
        let resolution = resolver().resolve("Mobile Phone", &profile).unwrap();
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["entry"]["field"], "phone");
        assert_eq!(json["value"], "555-0100");
    }
}
