//! Per-field value normalizers
//!
//! Every normalizer takes the raw extracted string and returns the canonical
//! value, or `None` when nothing usable remains. Nothing here panics or
//! returns an error; an unparseable value simply leaves the field unset.

mod categorical;
mod date;
mod height;
mod phone;

pub use categorical::{
    clean_person_name, normalize_diet, normalize_family_type, normalize_gender,
    normalize_manglik, normalize_marital_status, normalize_religion,
};
pub use date::{age_from_dob, normalize_age, to_24h_time, to_iso_date};
pub use height::normalize_height;
pub use phone::normalize_phone;

use biodata_core::ProfileField;

use crate::normalizer::{clean_candidate_value, has_content, title_case};

/// Canonical text value for a free-text or formatted field.
///
/// `Gender` and `Manglik` are enums on the profile and go through
/// `normalize_gender` / `normalize_manglik` instead; they return `None` here.
pub fn normalize_value(field: ProfileField, raw: &str) -> Option<String> {
    use ProfileField::*;

    let raw = clean_candidate_value(raw);
    if !has_content(&raw) {
        return None;
    }

    let value = match field {
        Gender | Manglik => return None,
        Dob => return to_iso_date(&raw),
        Tob => return to_24h_time(&raw),
        Height => return normalize_height(&raw),
        Contact => return normalize_phone(&raw),
        Age => return normalize_age(&raw),
        Name | FatherName | MotherName => clean_person_name(&raw),
        Religion => normalize_religion(&raw),
        MaritalStatus => normalize_marital_status(&raw),
        FamilyType => normalize_family_type(&raw),
        Diet => normalize_diet(&raw),
        Pob | City | State | Country | Caste | SubCaste | Gotra | Complexion => title_case(&raw),
        Income => raw.to_uppercase(),
        Education | Profession | Company | FatherOccupation | MotherOccupation | Siblings
        | About => raw,
    };

    has_content(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        assert_eq!(
            normalize_value(ProfileField::Dob, "15/08/1995").as_deref(),
            Some("1995-08-15")
        );
        assert_eq!(
            normalize_value(ProfileField::City, "new DELHI,").as_deref(),
            Some("New Delhi")
        );
        assert_eq!(
            normalize_value(ProfileField::Income, "12 lpa").as_deref(),
            Some("12 LPA")
        );
        assert_eq!(
            normalize_value(ProfileField::Profession, "Software Engineer at XYZ").as_deref(),
            Some("Software Engineer at XYZ")
        );
        assert_eq!(
            normalize_value(ProfileField::FatherName, "Mr. ramesh verma").as_deref(),
            Some("Ramesh Verma")
        );
    }

    #[test]
    fn test_enum_fields_and_noise_are_not_text() {
        assert!(normalize_value(ProfileField::Gender, "Male").is_none());
        assert!(normalize_value(ProfileField::Manglik, "No").is_none());
        assert!(normalize_value(ProfileField::Caste, " -- | ").is_none());
        assert!(normalize_value(ProfileField::Height, "tall").is_none());
    }
}
