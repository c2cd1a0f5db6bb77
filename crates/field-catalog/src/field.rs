use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical question identity, independent of how a page words or renders it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticField {
    // contact
    Phone,
    Email,
    Address,
    City,
    CityState,
    State,
    ZipCode,
    Country,
    // experience
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
    // questions
    LinkedinUrl,
    GithubUrl,
    AuthorizedToWork,
    RequireSponsorship,
    OverAge18,
    EducationLevel,
    SecurityClearance,
    BackgroundCheck,
    SmsConsent,
    ReferralName,
    ReferralQuestion,
    HearAboutUs,
    PriorEmployment,
    AffiliatedInstitution,
    WorkSetting,
    Acknowledgment,
    // demographics / signature
    FullName,
    Gender,
    Ethnicity,
    VeteranStatus,
    DisabilityStatus,
    TodayDate,
}

impl SemanticField {
    /// Key under which the profile stores this field's answer. Fields that
    /// are only ever fixed or derived have none.
    pub fn profile_key(self) -> Option<&'static str> {
        use SemanticField::*;
        let key = match self {
            Phone => "phone",
            Email => "email",
            Address => "address",
            City => "city",
            CityState => "cityState",
            State => "state",
            ZipCode => "zipCode",
            Country => "country",
            JobTitle => "jobTitle",
            CompanyName => "companyName",
            MiddleName => "middleName",
            DegreeMajor => "degreeMajor",
            SecurityClearanceLevel => "securityClearanceLevel",
            YearsOfSoftwareDevelopment => "yearsOfSoftwareDevelopment",
            YearsOfOop => "yearsOfOOP",
            YearsOfPhp => "yearsOfPHP",
            YearsOfSoftwareArchitecture => "yearsOfSoftwareArchitecture",
            YearsOfLeadership => "yearsOfLeadership",
            YearsOfTechnicalDrawing => "yearsOfTechnicalDrawing",
            YearsOfRequirementsGathering => "yearsOfRequirementsGathering",
            YearsOfJavaScript => "yearsOfJavaScript",
            YearsOfB2bEcommerce => "yearsOfB2BEcommerce",
            AvailableTimes => "availableTimes",
            LinkedinUrl => "linkedinUrl",
            GithubUrl => "githubUrl",
            AuthorizedToWork => "authorizedToWork",
            RequireSponsorship => "requireSponsorship",
            OverAge18 => "overAge18",
            EducationLevel => "educationLevel",
            SecurityClearance => "securityClearance",
            BackgroundCheck => "backgroundCheck",
            ReferralQuestion => "referralQuestion",
            Acknowledgment => "acknowledgmentQuestion",
            FullName => "fullName",
            Gender => "gender",
            Ethnicity => "ethnicity",
            VeteranStatus => "veteranStatus",
            DisabilityStatus => "disabilityStatus",
            SmsConsent | ReferralName | HearAboutUs | PriorEmployment | AffiliatedInstitution
            | WorkSetting | TodayDate => return None,
        };
        Some(key)
    }

    /// Stable identifier used in logs and reports.
    pub fn name(self) -> &'static str {
        use SemanticField::*;
        match self {
            SmsConsent => "smsConsent",
            ReferralName => "referralName",
            HearAboutUs => "hearAboutUs",
            PriorEmployment => "priorEmployment",
            AffiliatedInstitution => "affiliatedInstitution",
            WorkSetting => "workSetting",
            TodayDate => "todayDate",
            Acknowledgment => "acknowledgment",
            other => other.profile_key().unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
