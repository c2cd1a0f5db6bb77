use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::field::SemanticField;
use crate::widget::{AliasTable, WidgetKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Lowercase substring searched for in the normalized label.
    pub pattern: &'static str,
    pub field: SemanticField,
    pub widget: WidgetKind,
    pub demographic: bool,
    pub fixed_value: Option<&'static str>,
    /// The pattern must not be part of a longer word ("city" in "ethnicity").
    pub whole_word: bool,
}

impl CatalogEntry {
    const fn new(pattern: &'static str, field: SemanticField, widget: WidgetKind) -> Self {
        Self {
            pattern,
            field,
            widget,
            demographic: false,
            fixed_value: None,
            whole_word: false,
        }
    }

    const fn word(mut self) -> Self {
        self.whole_word = true;
        self
    }

    const fn demographic(mut self) -> Self {
        self.demographic = true;
        self
    }

    const fn fixed(mut self, value: &'static str) -> Self {
        self.fixed_value = Some(value);
        self
    }

    pub fn matches(&self, label: &str) -> bool {
        if self.whole_word {
            contains_word(label, self.pattern)
        } else {
            label.contains(self.pattern)
        }
    }
}

fn contains_word(label: &str, word: &str) -> bool {
    label.match_indices(word).any(|(start, _)| {
        let before = label[..start].chars().next_back();
        let after = label[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

use SemanticField as F;
use WidgetKind as W;

const fn text(p: &'static str, f: SemanticField) -> CatalogEntry {
    CatalogEntry::new(p, f, W::Text)
}

const fn radio(p: &'static str, f: SemanticField) -> CatalogEntry {
    CatalogEntry::new(p, f, W::Radio(None))
}

const fn select(p: &'static str, f: SemanticField) -> CatalogEntry {
    CatalogEntry::new(p, f, W::Select(None))
}

const fn years(p: &'static str, f: SemanticField) -> CatalogEntry {
    CatalogEntry::new(p, f, W::ExperienceRange)
}

// Long, question-shaped phrases come first so that generic contact words
// ("state", "address", "country") embedded in a question do not capture it.
const ENTRIES: &[CatalogEntry] = &[
    // fixed-answer policy questions
    radio("sponsorship", F::RequireSponsorship).fixed("No"),
    radio("text message", F::SmsConsent).fixed("Yes"),
    radio("sms", F::SmsConsent).fixed("Yes").word(),
    text("referral name", F::ReferralName).fixed("N/A"),
    text("who referred you", F::ReferralName).fixed("N/A"),
    radio("were you referred", F::ReferralQuestion).fixed("No"),
    radio("referred by an", F::ReferralQuestion).fixed("No"),
    CatalogEntry::new("how did you hear", F::HearAboutUs, W::Choice).fixed("Indeed.com"),
    CatalogEntry::new("where did you hear", F::HearAboutUs, W::Choice).fixed("Indeed.com"),
    radio("previously worked for", F::PriorEmployment).fixed("No"),
    radio("previously employed", F::PriorEmployment).fixed("No"),
    radio("ever worked for", F::PriorEmployment).fixed("No"),
    radio("prior employment", F::PriorEmployment).fixed("No"),
    radio("currently attending", F::AffiliatedInstitution).fixed("No"),
    radio("currently enrolled", F::AffiliatedInstitution).fixed("No"),
    CatalogEntry::new("work setting", F::WorkSetting, W::Choice).fixed("no preference"),
    CatalogEntry::new("work environment", F::WorkSetting, W::Choice).fixed("no preference"),
    CatalogEntry::new("acknowledge", F::Acknowledgment, W::Agreement).fixed("agree"),
    CatalogEntry::new("do you agree", F::Acknowledgment, W::Agreement).fixed("agree"),
    CatalogEntry::new("i agree", F::Acknowledgment, W::Agreement).fixed("agree"),
    CatalogEntry::new("attest", F::Acknowledgment, W::Agreement).fixed("agree"),
    // profile-backed questions
    radio("authorized to work", F::AuthorizedToWork),
    radio("legally authorized", F::AuthorizedToWork),
    radio("eligible to work", F::AuthorizedToWork),
    radio("at least 18", F::OverAge18),
    radio("18 years", F::OverAge18),
    select("security clearance level", F::SecurityClearanceLevel),
    select("level of security clearance", F::SecurityClearanceLevel),
    select("clearance level", F::SecurityClearanceLevel),
    radio("security clearance", F::SecurityClearance),
    radio("background check", F::BackgroundCheck),
    radio("eligible to pass a background", F::BackgroundCheck),
    select("level of education", F::EducationLevel),
    select("education level", F::EducationLevel),
    text("linkedin", F::LinkedinUrl),
    text("github", F::GithubUrl),
    // experience
    text("job title", F::JobTitle),
    text("company name", F::CompanyName),
    text("most recent employer", F::CompanyName),
    text("middle name", F::MiddleName),
    text("field of study", F::DegreeMajor),
    text("major", F::DegreeMajor),
    years("software development", F::YearsOfSoftwareDevelopment),
    years("object-oriented", F::YearsOfOop),
    years("object oriented", F::YearsOfOop),
    years("oop", F::YearsOfOop).word(),
    years("php", F::YearsOfPhp),
    years("software architecture", F::YearsOfSoftwareArchitecture),
    years("leadership", F::YearsOfLeadership),
    years("technical drawing", F::YearsOfTechnicalDrawing),
    years("requirements gathering", F::YearsOfRequirementsGathering),
    years("javascript", F::YearsOfJavaScript),
    years("b2b", F::YearsOfB2bEcommerce),
    CatalogEntry::new("availability", F::AvailableTimes, W::AvailabilityPairs),
    CatalogEntry::new("days and times", F::AvailableTimes, W::AvailabilityPairs),
    CatalogEntry::new("when are you available", F::AvailableTimes, W::AvailabilityPairs),
    // signature and demographics, gated
    CatalogEntry::new("signature date", F::TodayDate, W::Date).demographic(),
    CatalogEntry::new("today's date", F::TodayDate, W::Date).demographic(),
    text("your name", F::FullName).demographic(),
    text("full name", F::FullName).demographic(),
    text("signature", F::FullName).demographic(),
    CatalogEntry::new("gender", F::Gender, W::Radio(Some(AliasTable::Gender))).demographic(),
    CatalogEntry::new("ethnicity", F::Ethnicity, W::Select(Some(AliasTable::Ethnicity)))
        .demographic(),
    CatalogEntry::new("race", F::Ethnicity, W::Select(Some(AliasTable::Ethnicity)))
        .demographic()
        .word(),
    CatalogEntry::new("veteran", F::VeteranStatus, W::Radio(Some(AliasTable::Veteran)))
        .demographic(),
    CatalogEntry::new("vevraa", F::VeteranStatus, W::Radio(Some(AliasTable::Veteran)))
        .demographic(),
    CatalogEntry::new(
        "disability",
        F::DisabilityStatus,
        W::Radio(Some(AliasTable::Disability)),
    )
    .demographic(),
    CatalogEntry::new(
        "form cc-305",
        F::DisabilityStatus,
        W::Radio(Some(AliasTable::Disability)),
    )
    .demographic(),
    // contact
    text("cell phone", F::Phone),
    text("mobile phone", F::Phone),
    text("phone", F::Phone),
    text("email", F::Email),
    CatalogEntry::new("city, state", F::CityState, W::Combobox),
    CatalogEntry::new("city and state", F::CityState, W::Combobox),
    text("street address", F::Address),
    text("address", F::Address),
    text("city", F::City).word(),
    select("state", F::State).word(),
    text("postal code", F::ZipCode),
    text("zip code", F::ZipCode),
    text("zip", F::ZipCode).word(),
    select("country", F::Country),
    // most generic pattern last
    CatalogEntry::new("date", F::TodayDate, W::Date).demographic(),
];

/// Ordered, immutable catalog with a per-field index.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_field: HashMap<SemanticField, Vec<usize>>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut by_field: HashMap<SemanticField, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_field.entry(entry.field).or_default().push(idx);
        }
        Self { entries, by_field }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose pattern occurs in `label`, in catalog order.
    pub fn matching<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.matches(label))
    }

    pub fn entries_for(&self, field: SemanticField) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.by_field
            .get(&field)
            .into_iter()
            .flatten()
            .map(move |idx| &self.entries[*idx])
    }

    /// Pairs `(earlier, later)` where the earlier pattern is a substring of
    /// the later one, so the later entry could never be reached first.
    pub fn shadowed_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        for (i, earlier) in self.entries.iter().enumerate() {
            for later in &self.entries[i + 1..] {
                if later.pattern.contains(earlier.pattern) {
                    out.push((earlier.pattern, later.pattern));
                }
            }
        }
        out
    }
}

pub static CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog::new(ENTRIES.to_vec()));
