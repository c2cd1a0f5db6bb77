use serde::Serialize;

use crate::demographics::{
    AliasPhrase, DemographicCode, DisabilityStatus, Ethnicity, Gender, VeteranStatus,
};

/// Which demographic encoding a select/radio question uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AliasTable {
    Gender,
    Ethnicity,
    Veteran,
    Disability,
}

impl AliasTable {
    /// Label phrases for a profile value, if the value is a known code or
    /// variant name in this table.
    pub fn alias_for(self, value: &str) -> Option<AliasPhrase> {
        match self {
            AliasTable::Gender => Gender::from_profile(value).map(DemographicCode::alias),
            AliasTable::Ethnicity => Ethnicity::from_profile(value).map(DemographicCode::alias),
            AliasTable::Veteran => VeteranStatus::from_profile(value).map(DemographicCode::alias),
            AliasTable::Disability => {
                DisabilityStatus::from_profile(value).map(DemographicCode::alias)
            }
        }
    }
}

/// Closed set of fill strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "aliases", rename_all = "camelCase")]
pub enum WidgetKind {
    Text,
    Select(Option<AliasTable>),
    Radio(Option<AliasTable>),
    Date,
    Combobox,
    ExperienceRange,
    AvailabilityPairs,
    /// Radio group whose affirmative "agree" option is chosen.
    Agreement,
    /// Whatever the question renders: a select, a radio group, else text.
    Choice,
}

impl WidgetKind {
    pub fn label(&self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Select(_) => "select",
            WidgetKind::Radio(_) => "radio",
            WidgetKind::Date => "date",
            WidgetKind::Combobox => "combobox",
            WidgetKind::ExperienceRange => "experience-range",
            WidgetKind::AvailabilityPairs => "availability-pairs",
            WidgetKind::Agreement => "agreement",
            WidgetKind::Choice => "choice",
        }
    }

    pub fn aliases(&self) -> Option<AliasTable> {
        match self {
            WidgetKind::Select(table) | WidgetKind::Radio(table) => *table,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lookup_by_code() {
        let phrase = AliasTable::Veteran.alias_for("51").unwrap();
        assert!(phrase.matches("i identify as a protected veteran"));
        assert!(AliasTable::Gender.alias_for("unknown").is_none());
    }

    #[test]
    fn widget_labels() {
        assert_eq!(WidgetKind::Select(None).label(), "select");
        assert_eq!(
            WidgetKind::Radio(Some(AliasTable::Disability)).aliases(),
            Some(AliasTable::Disability)
        );
    }
}
