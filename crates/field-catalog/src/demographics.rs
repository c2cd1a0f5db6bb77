//! Demographic answer encodings.
//!
//! Profiles store demographic answers as short numeric codes (or the variant
//! name). Pages render them as free-text option labels, so each variant also
//! carries the label phrases that identify its option.

/// A label matches when it contains any `any_of` phrase and none of the
/// `none_of` phrases. Phrases are lowercase; labels are expected lowercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AliasPhrase {
    pub any_of: &'static [&'static str],
    pub none_of: &'static [&'static str],
}

impl AliasPhrase {
    pub const fn new(any_of: &'static [&'static str], none_of: &'static [&'static str]) -> Self {
        Self { any_of, none_of }
    }

    pub fn matches(&self, label: &str) -> bool {
        self.any_of.iter().any(|p| label.contains(p))
            && !self.none_of.iter().any(|p| label.contains(p))
    }
}

const DECLINE: AliasPhrase = AliasPhrase::new(
    &[
        "decline",
        "prefer not",
        "do not wish",
        "don't wish",
        "do not want to answer",
        "don't want to answer",
        "not to answer",
        "not to disclose",
        "choose not",
    ],
    &[],
);

pub trait DemographicCode: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// External code stored in the profile.
    fn code(self) -> &'static str;

    fn name(self) -> &'static str;

    fn alias(self) -> AliasPhrase;

    /// Accepts either the code or the variant name.
    fn from_profile(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.code() == raw || v.name().eq_ignore_ascii_case(raw))
    }

    /// First variant whose alias matches an option label.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.alias().matches(label))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Declined,
}

impl DemographicCode for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Declined];

    fn code(self) -> &'static str {
        match self {
            Gender::Male => "1",
            Gender::Female => "2",
            Gender::Declined => "3",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Declined => "declined",
        }
    }

    fn alias(self) -> AliasPhrase {
        match self {
            Gender::Male => AliasPhrase::new(&["male", "man"], &["female", "woman"]),
            Gender::Female => AliasPhrase::new(&["female", "woman"], &[]),
            Gender::Declined => DECLINE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ethnicity {
    HispanicOrLatino,
    White,
    BlackOrAfricanAmerican,
    Asian,
    PacificIslander,
    NativeAmerican,
    TwoOrMore,
    Declined,
}

impl DemographicCode for Ethnicity {
    const ALL: &'static [Self] = &[
        Ethnicity::HispanicOrLatino,
        Ethnicity::White,
        Ethnicity::BlackOrAfricanAmerican,
        Ethnicity::Asian,
        Ethnicity::PacificIslander,
        Ethnicity::NativeAmerican,
        Ethnicity::TwoOrMore,
        Ethnicity::Declined,
    ];

    fn code(self) -> &'static str {
        match self {
            Ethnicity::HispanicOrLatino => "1",
            Ethnicity::White => "2",
            Ethnicity::BlackOrAfricanAmerican => "3",
            Ethnicity::Asian => "4",
            Ethnicity::PacificIslander => "5",
            Ethnicity::NativeAmerican => "6",
            Ethnicity::TwoOrMore => "7",
            Ethnicity::Declined => "8",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Ethnicity::HispanicOrLatino => "hispanic",
            Ethnicity::White => "white",
            Ethnicity::BlackOrAfricanAmerican => "black",
            Ethnicity::Asian => "asian",
            Ethnicity::PacificIslander => "pacificIslander",
            Ethnicity::NativeAmerican => "nativeAmerican",
            Ethnicity::TwoOrMore => "twoOrMore",
            Ethnicity::Declined => "declined",
        }
    }

    fn alias(self) -> AliasPhrase {
        match self {
            Ethnicity::HispanicOrLatino => AliasPhrase::new(
                &["hispanic", "latino", "latina", "latinx"],
                &["not hispanic", "not of hispanic"],
            ),
            Ethnicity::White => AliasPhrase::new(&["white"], &[]),
            Ethnicity::BlackOrAfricanAmerican => {
                AliasPhrase::new(&["black", "african american"], &[])
            }
            Ethnicity::Asian => AliasPhrase::new(&["asian"], &[]),
            Ethnicity::PacificIslander => {
                AliasPhrase::new(&["pacific islander", "native hawaiian"], &[])
            }
            Ethnicity::NativeAmerican => AliasPhrase::new(
                &["american indian", "alaska native", "native american"],
                &[],
            ),
            Ethnicity::TwoOrMore => {
                AliasPhrase::new(&["two or more", "multiracial", "multi-racial"], &[])
            }
            Ethnicity::Declined => DECLINE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VeteranStatus {
    Protected,
    NotProtected,
    Declined,
}

impl DemographicCode for VeteranStatus {
    const ALL: &'static [Self] = &[
        VeteranStatus::Protected,
        VeteranStatus::NotProtected,
        VeteranStatus::Declined,
    ];

    fn code(self) -> &'static str {
        match self {
            VeteranStatus::Protected => "51",
            VeteranStatus::NotProtected => "52",
            VeteranStatus::Declined => "53",
        }
    }

    fn name(self) -> &'static str {
        match self {
            VeteranStatus::Protected => "protected",
            VeteranStatus::NotProtected => "notProtected",
            VeteranStatus::Declined => "declined",
        }
    }

    fn alias(self) -> AliasPhrase {
        match self {
            VeteranStatus::Protected => AliasPhrase::new(
                &["protected veteran", "identify as one or more"],
                &["not a protected", "not protected", "am not a"],
            ),
            VeteranStatus::NotProtected => AliasPhrase::new(
                &["not a protected veteran", "not protected", "not a veteran"],
                &[],
            ),
            VeteranStatus::Declined => DECLINE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisabilityStatus {
    HasDisability,
    NoDisability,
    Declined,
}

impl DemographicCode for DisabilityStatus {
    const ALL: &'static [Self] = &[
        DisabilityStatus::HasDisability,
        DisabilityStatus::NoDisability,
        DisabilityStatus::Declined,
    ];

    fn code(self) -> &'static str {
        match self {
            DisabilityStatus::HasDisability => "1",
            DisabilityStatus::NoDisability => "2",
            DisabilityStatus::Declined => "3",
        }
    }

    fn name(self) -> &'static str {
        match self {
            DisabilityStatus::HasDisability => "yes",
            DisabilityStatus::NoDisability => "no",
            DisabilityStatus::Declined => "declined",
        }
    }

    fn alias(self) -> AliasPhrase {
        match self {
            DisabilityStatus::HasDisability => AliasPhrase::new(
                &["yes, i have", "i have a disability", "had one in the past"],
                &["don't have", "do not have"],
            ),
            DisabilityStatus::NoDisability => AliasPhrase::new(
                &[
                    "no, i don't",
                    "no, i do not",
                    "don't have a disability",
                    "do not have a disability",
                ],
                &[],
            ),
            DisabilityStatus::Declined => DECLINE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_unique<T: DemographicCode>() -> bool {
        let mut codes: Vec<&str> = T::ALL.iter().map(|v| v.code()).collect();
        codes.sort_unstable();
        let before = codes.len();
        codes.dedup();
        before == codes.len()
    }

    #[test]
    fn every_table_has_unique_codes() {
        assert!(codes_unique::<Gender>());
        assert!(codes_unique::<Ethnicity>());
        assert!(codes_unique::<VeteranStatus>());
        assert!(codes_unique::<DisabilityStatus>());
    }

    #[test]
    fn codes_and_names_parse() {
        assert_eq!(
            VeteranStatus::from_profile("51"),
            Some(VeteranStatus::Protected)
        );
        assert_eq!(
            VeteranStatus::from_profile("notProtected"),
            Some(VeteranStatus::NotProtected)
        );
        assert_eq!(Gender::from_profile(" 2 "), Some(Gender::Female));
        assert_eq!(Ethnicity::from_profile("99"), None);
    }

    #[test]
    fn negated_labels_do_not_match_the_positive_variant() {
        let protected = VeteranStatus::Protected.alias();
        assert!(protected.matches("i identify as one or more of the classifications of protected veteran"));
        assert!(!protected.matches("i am not a protected veteran"));
        assert!(!Gender::Male.alias().matches("female"));
        assert_eq!(
            VeteranStatus::from_label("i am not a protected veteran"),
            Some(VeteranStatus::NotProtected)
        );
    }

    #[test]
    fn disability_labels_resolve() {
        assert_eq!(
            DisabilityStatus::from_label("no, i do not have a disability and have not had one in the past"),
            Some(DisabilityStatus::NoDisability)
        );
        assert_eq!(
            DisabilityStatus::from_label("yes, i have a disability (or previously had a disability)"),
            Some(DisabilityStatus::HasDisability)
        );
        assert_eq!(
            DisabilityStatus::from_label("i do not want to answer"),
            Some(DisabilityStatus::Declined)
        );
    }
}
