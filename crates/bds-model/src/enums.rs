//! Coded categorical values stored on blood bank records.
//!
//! Each code list is a closed enum with a fixed stored code and a fixed
//! display label. Records keep values as [`Coded`] so that codes the
//! backend returns but this crate does not know about survive untouched
//! and can be shown verbatim in reports.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A closed list of stored codes with their display labels.
///
/// The `code`/`label` pair of every variant is the normalization table for
/// that field; reports never derive labels any other way.
pub trait CodeList: Copy + Eq + Sized + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// The value as stored in the row store.
    fn code(self) -> &'static str;

    /// The value as displayed to lab staff.
    fn label(self) -> &'static str;

    /// Look up a stored code, ignoring case and surrounding whitespace.
    fn from_code(raw: &str) -> Option<Self> {
        let normalized = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.code().eq_ignore_ascii_case(normalized))
    }
}

/// A stored categorical value: either a known code or the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Coded<T: CodeList> {
    Known(T),
    Other(String),
}

impl<T: CodeList> Coded<T> {
    pub fn parse(raw: &str) -> Self {
        match T::from_code(raw) {
            Some(known) => Coded::Known(known),
            None => Coded::Other(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Coded::Known(value) => Some(*value),
            Coded::Other(_) => None,
        }
    }

    /// The stored form of the value.
    pub fn code(&self) -> &str {
        match self {
            Coded::Known(value) => value.code(),
            Coded::Other(raw) => raw,
        }
    }

    /// The display label; unknown codes pass through unchanged.
    pub fn label(&self) -> &str {
        match self {
            Coded::Known(value) => value.label(),
            Coded::Other(raw) => raw,
        }
    }

    /// True when the stored value is blank.
    pub fn is_blank(&self) -> bool {
        self.code().trim().is_empty()
    }
}

impl<T: CodeList> From<T> for Coded<T> {
    fn from(value: T) -> Self {
        Coded::Known(value)
    }
}

impl<T: CodeList> From<String> for Coded<T> {
    fn from(raw: String) -> Self {
        match T::from_code(&raw) {
            Some(known) => Coded::Known(known),
            None => Coded::Other(raw),
        }
    }
}

impl<T: CodeList> From<Coded<T>> for String {
    fn from(value: Coded<T>) -> Self {
        match value {
            Coded::Known(known) => known.code().to_string(),
            Coded::Other(raw) => raw,
        }
    }
}

impl<T: CodeList> Serialize for Coded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de, T: CodeList> Deserialize<'de> for Coded<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Coded::from(raw))
    }
}

impl<T: CodeList> fmt::Display for Coded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical blood-bag configuration used for a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BagType {
    Single,
    Double,
    Triple,
    NonBled,
    MegaUnit,
}

impl CodeList for BagType {
    const ALL: &'static [Self] = &[
        BagType::Single,
        BagType::Double,
        BagType::Triple,
        BagType::NonBled,
        BagType::MegaUnit,
    ];

    fn code(self) -> &'static str {
        match self {
            BagType::Single => "single",
            BagType::Double => "double",
            BagType::Triple => "triple",
            BagType::NonBled => "nonbled",
            BagType::MegaUnit => "megaunit",
        }
    }

    fn label(self) -> &'static str {
        match self {
            BagType::Single => "Single",
            BagType::Double => "Double",
            BagType::Triple => "Triple",
            BagType::NonBled => "Non-Bled",
            BagType::MegaUnit => "Mega Unit",
        }
    }
}

/// Administrative relationship of a donor to the blood bank.
///
/// `Apheresis` has no display mapping and is shown as its stored code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DonorCategory {
    Voluntary,
    Replacement,
    Directed,
    Autologous,
    Apheresis,
}

impl CodeList for DonorCategory {
    const ALL: &'static [Self] = &[
        DonorCategory::Voluntary,
        DonorCategory::Replacement,
        DonorCategory::Directed,
        DonorCategory::Autologous,
        DonorCategory::Apheresis,
    ];

    fn code(self) -> &'static str {
        match self {
            DonorCategory::Voluntary => "voluntary",
            DonorCategory::Replacement => "replacement",
            DonorCategory::Directed => "directed",
            DonorCategory::Autologous => "autologous",
            DonorCategory::Apheresis => "apheresis",
        }
    }

    fn label(self) -> &'static str {
        match self {
            DonorCategory::Voluntary => "EX / OPD",
            DonorCategory::Replacement => "EX / Patient",
            DonorCategory::Directed => "Call Donor",
            DonorCategory::Autologous => "Self Donor",
            DonorCategory::Apheresis => "apheresis",
        }
    }
}

/// ABO blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BloodGroup {
    A,
    B,
    O,
    AB,
}

impl CodeList for BloodGroup {
    const ALL: &'static [Self] = &[BloodGroup::A, BloodGroup::B, BloodGroup::O, BloodGroup::AB];

    fn code(self) -> &'static str {
        match self {
            BloodGroup::A => "A",
            BloodGroup::B => "B",
            BloodGroup::O => "O",
            BloodGroup::AB => "AB",
        }
    }

    fn label(self) -> &'static str {
        self.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RhFactor {
    Positive,
    Negative,
}

impl CodeList for RhFactor {
    const ALL: &'static [Self] = &[RhFactor::Positive, RhFactor::Negative];

    fn code(self) -> &'static str {
        match self {
            RhFactor::Positive => "+ve",
            RhFactor::Negative => "-ve",
        }
    }

    fn label(self) -> &'static str {
        self.code()
    }
}

/// Overall crossmatch determination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CrossmatchOutcome {
    Compatible,
    Incompatible,
    NotPerformed,
}

impl CodeList for CrossmatchOutcome {
    const ALL: &'static [Self] = &[
        CrossmatchOutcome::Compatible,
        CrossmatchOutcome::Incompatible,
        CrossmatchOutcome::NotPerformed,
    ];

    fn code(self) -> &'static str {
        match self {
            CrossmatchOutcome::Compatible => "compatible",
            CrossmatchOutcome::Incompatible => "incompatible",
            CrossmatchOutcome::NotPerformed => "not_performed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CrossmatchOutcome::Compatible => "Compatible",
            CrossmatchOutcome::Incompatible => "Incompatible",
            CrossmatchOutcome::NotPerformed => "Not Performed",
        }
    }
}

/// Qualitative reading of a single crossmatch phase (albumin, saline, coomb).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reactivity {
    Reactive,
    NonReactive,
    NotTested,
}

impl CodeList for Reactivity {
    const ALL: &'static [Self] = &[
        Reactivity::Reactive,
        Reactivity::NonReactive,
        Reactivity::NotTested,
    ];

    fn code(self) -> &'static str {
        match self {
            Reactivity::Reactive => "reactive",
            Reactivity::NonReactive => "non_reactive",
            Reactivity::NotTested => "not_tested",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Reactivity::Reactive => "Reactive",
            Reactivity::NonReactive => "Non-Reactive",
            Reactivity::NotTested => "Not Tested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_ignores_case_and_whitespace() {
        assert_eq!(BagType::from_code(" Single "), Some(BagType::Single));
        assert_eq!(BagType::from_code("MEGAUNIT"), Some(BagType::MegaUnit));
        assert_eq!(BloodGroup::from_code("ab"), Some(BloodGroup::AB));
        assert_eq!(BagType::from_code("quad"), None);
    }

    #[test]
    fn test_donor_category_labels() {
        assert_eq!(DonorCategory::Voluntary.label(), "EX / OPD");
        assert_eq!(DonorCategory::Replacement.label(), "EX / Patient");
        assert_eq!(DonorCategory::Directed.label(), "Call Donor");
        assert_eq!(DonorCategory::Autologous.label(), "Self Donor");
        assert_eq!(DonorCategory::Apheresis.label(), "apheresis");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        let coded: Coded<DonorCategory> = Coded::parse("blood_camp");
        assert_eq!(coded, Coded::Other("blood_camp".to_string()));
        assert_eq!(coded.label(), "blood_camp");
        assert_eq!(coded.known(), None);
    }

    #[test]
    fn test_codes_are_unique_per_list() {
        fn assert_unique<T: CodeList>() {
            for (idx, left) in T::ALL.iter().enumerate() {
                for right in &T::ALL[idx + 1..] {
                    assert_ne!(left.code(), right.code());
                }
            }
        }
        assert_unique::<BagType>();
        assert_unique::<DonorCategory>();
        assert_unique::<BloodGroup>();
        assert_unique::<RhFactor>();
        assert_unique::<CrossmatchOutcome>();
        assert_unique::<Reactivity>();
    }
}
