//! Profile record and field keys
//!
//! `Profile` is a strongly-typed partial record: every attribute is optional
//! and an unset attribute means "not extracted". There are no empty-string
//! sentinels. Serialized keys use camelCase so the JSON matches the profile
//! documents the editing form works with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Canonical profile field keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Name,
    Gender,
    Age,
    Dob,
    Tob,
    Pob,
    Height,
    MaritalStatus,
    Complexion,
    Diet,
    City,
    State,
    Country,
    Religion,
    Caste,
    SubCaste,
    Gotra,
    Manglik,
    Education,
    Profession,
    Company,
    Income,
    FatherName,
    FatherOccupation,
    MotherName,
    MotherOccupation,
    Siblings,
    FamilyType,
    About,
    Contact,
}

impl ProfileField {
    /// Every field, in profile order
    pub const ALL: [ProfileField; 30] = [
        Self::Name,
        Self::Gender,
        Self::Age,
        Self::Dob,
        Self::Tob,
        Self::Pob,
        Self::Height,
        Self::MaritalStatus,
        Self::Complexion,
        Self::Diet,
        Self::City,
        Self::State,
        Self::Country,
        Self::Religion,
        Self::Caste,
        Self::SubCaste,
        Self::Gotra,
        Self::Manglik,
        Self::Education,
        Self::Profession,
        Self::Company,
        Self::Income,
        Self::FatherName,
        Self::FatherOccupation,
        Self::MotherName,
        Self::MotherOccupation,
        Self::Siblings,
        Self::FamilyType,
        Self::About,
        Self::Contact,
    ];

    /// Serialized key (camelCase)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Dob => "dob",
            Self::Tob => "tob",
            Self::Pob => "pob",
            Self::Height => "height",
            Self::MaritalStatus => "maritalStatus",
            Self::Complexion => "complexion",
            Self::Diet => "diet",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::Religion => "religion",
            Self::Caste => "caste",
            Self::SubCaste => "subCaste",
            Self::Gotra => "gotra",
            Self::Manglik => "manglik",
            Self::Education => "education",
            Self::Profession => "profession",
            Self::Company => "company",
            Self::Income => "income",
            Self::FatherName => "fatherName",
            Self::FatherOccupation => "fatherOccupation",
            Self::MotherName => "motherName",
            Self::MotherOccupation => "motherOccupation",
            Self::Siblings => "siblings",
            Self::FamilyType => "familyType",
            Self::About => "about",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = Error;

    /// Accepts the camelCase key as well as snake_case spellings
    /// (`maritalStatus`, `marital_status`, `MARITAL_STATUS`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// Candidate gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Manglik (astrological) classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manglik {
    Yes,
    No,
    #[serde(rename = "Anshik (Partial)")]
    Anshik,
    #[serde(rename = "Don't Know")]
    DontKnow,
}

impl Manglik {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Anshik => "Anshik (Partial)",
            Self::DontKnow => "Don't Know",
        }
    }
}

/// Structured matrimonial profile extracted from a biodata message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// ISO `yyyy-mm-dd`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// 24h `HH:mm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pob: Option<String>,
    /// `"<feet>ft <inches>in"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caste: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_caste: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gotra: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manglik: Option<Manglik>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siblings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// 10 digits, or `+` followed by at least 10 digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field as text, if set
    pub fn value(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Gender => self.gender.as_ref().map(Gender::as_str),
            ProfileField::Manglik => self.manglik.as_ref().map(Manglik::as_str),
            _ => self.text_ref(field).and_then(|slot| slot.as_deref()),
        }
    }

    pub fn is_set(&self, field: ProfileField) -> bool {
        self.value(field).is_some()
    }

    /// Fields currently set, in profile order
    pub fn present_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .iter()
            .copied()
            .filter(|field| self.is_set(*field))
            .collect()
    }

    /// Mutable access to a free-text field slot.
    ///
    /// Returns `None` for enum-valued fields (`gender`, `manglik`), which
    /// are set through their typed attributes.
    pub fn text_slot_mut(&mut self, field: ProfileField) -> Option<&mut Option<String>> {
        let slot = match field {
            ProfileField::Gender | ProfileField::Manglik => return None,
            ProfileField::Name => &mut self.name,
            ProfileField::Age => &mut self.age,
            ProfileField::Dob => &mut self.dob,
            ProfileField::Tob => &mut self.tob,
            ProfileField::Pob => &mut self.pob,
            ProfileField::Height => &mut self.height,
            ProfileField::MaritalStatus => &mut self.marital_status,
            ProfileField::Complexion => &mut self.complexion,
            ProfileField::Diet => &mut self.diet,
            ProfileField::City => &mut self.city,
            ProfileField::State => &mut self.state,
            ProfileField::Country => &mut self.country,
            ProfileField::Religion => &mut self.religion,
            ProfileField::Caste => &mut self.caste,
            ProfileField::SubCaste => &mut self.sub_caste,
            ProfileField::Gotra => &mut self.gotra,
            ProfileField::Education => &mut self.education,
            ProfileField::Profession => &mut self.profession,
            ProfileField::Company => &mut self.company,
            ProfileField::Income => &mut self.income,
            ProfileField::FatherName => &mut self.father_name,
            ProfileField::FatherOccupation => &mut self.father_occupation,
            ProfileField::MotherName => &mut self.mother_name,
            ProfileField::MotherOccupation => &mut self.mother_occupation,
            ProfileField::Siblings => &mut self.siblings,
            ProfileField::FamilyType => &mut self.family_type,
            ProfileField::About => &mut self.about,
            ProfileField::Contact => &mut self.contact,
        };
        Some(slot)
    }

    fn text_ref(&self, field: ProfileField) -> Option<&Option<String>> {
        let slot = match field {
            ProfileField::Gender | ProfileField::Manglik => return None,
            ProfileField::Name => &self.name,
            ProfileField::Age => &self.age,
            ProfileField::Dob => &self.dob,
            ProfileField::Tob => &self.tob,
            ProfileField::Pob => &self.pob,
            ProfileField::Height => &self.height,
            ProfileField::MaritalStatus => &self.marital_status,
            ProfileField::Complexion => &self.complexion,
            ProfileField::Diet => &self.diet,
            ProfileField::City => &self.city,
            ProfileField::State => &self.state,
            ProfileField::Country => &self.country,
            ProfileField::Religion => &self.religion,
            ProfileField::Caste => &self.caste,
            ProfileField::SubCaste => &self.sub_caste,
            ProfileField::Gotra => &self.gotra,
            ProfileField::Education => &self.education,
            ProfileField::Profession => &self.profession,
            ProfileField::Company => &self.company,
            ProfileField::Income => &self.income,
            ProfileField::FatherName => &self.father_name,
            ProfileField::FatherOccupation => &self.father_occupation,
            ProfileField::MotherName => &self.mother_name,
            ProfileField::MotherOccupation => &self.mother_occupation,
            ProfileField::Siblings => &self.siblings,
            ProfileField::FamilyType => &self.family_type,
            ProfileField::About => &self.about,
            ProfileField::Contact => &self.contact,
        };
        Some(slot)
    }
}

/// Parser output: the partial profile and the keys that were auto-filled
///
/// `matched_fields` always lists exactly the fields set on `parsed`; the
/// editing form uses it to highlight auto-filled versus blank inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProfile {
    pub parsed: Profile,
    #[serde(rename = "matchedFields")]
    pub matched_fields: Vec<ProfileField>,
}

impl ParsedProfile {
    /// True when nothing could be extracted
    pub fn is_empty(&self) -> bool {
        self.matched_fields.is_empty()
    }

    pub fn is_matched(&self, field: ProfileField) -> bool {
        self.matched_fields.contains(&field)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
