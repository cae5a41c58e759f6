//! Visa feasibility resolver.
//!
//! Classifies admission of a passport holder into each country of a
//! candidate route and decides whether the whole country sequence is
//! feasible. Lookups are never defaulted: a missing (nationality,
//! country) entry is a distinct `UnknownVisaRule` outcome, reported
//! rather than guessed, so data gaps stay visible.

use std::collections::HashMap;

use crate::domain::CountryCode;

/// Admission category for a (nationality, country) pair.
///
/// The five categories the visa lookup table may carry. "Unknown" is
/// deliberately not a category; an absent entry surfaces as
/// [`UnknownVisaRule`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdmissionCategory {
    /// Entry without any visa
    VisaFree,
    /// Visa granted at the border on arrival
    VisaOnArrival,
    /// Electronic visa obtainable in advance
    EVisa,
    /// A conventional visa must be obtained in advance
    VisaRequired,
    /// The passport holder is not admitted at all
    NoAdmission,
}

impl AdmissionCategory {
    /// Whether this category permits passing through the country as a
    /// transit (non-final) stop.
    ///
    /// `VisaRequired` transit is disallowed by default; callers opt in
    /// via `allow_visa_required_transit`. Visa-on-arrival and e-visas
    /// count as feasible (acquisition delay is not modelled).
    pub fn permits_transit(self, allow_visa_required: bool) -> bool {
        match self {
            AdmissionCategory::VisaFree
            | AdmissionCategory::VisaOnArrival
            | AdmissionCategory::EVisa => true,
            AdmissionCategory::VisaRequired => allow_visa_required,
            AdmissionCategory::NoAdmission => false,
        }
    }

    /// Whether this category permits entry at the final destination.
    ///
    /// Only `NoAdmission` blocks final entry: a traveler can obtain a
    /// required visa in advance for where they are actually going.
    pub fn permits_final_entry(self) -> bool {
        !matches!(self, AdmissionCategory::NoAdmission)
    }
}

impl std::fmt::Display for AdmissionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AdmissionCategory::VisaFree => "visa-free",
            AdmissionCategory::VisaOnArrival => "visa on arrival",
            AdmissionCategory::EVisa => "e-visa",
            AdmissionCategory::VisaRequired => "visa required",
            AdmissionCategory::NoAdmission => "no admission",
        };
        f.write_str(s)
    }
}

/// Error for a (nationality, country) pair absent from the visa table.
///
/// Feasibility is never guessed; the affected connection is treated as
/// infeasible for the search and the gap is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("no visa rule for nationality {nationality} entering {country}")]
pub struct UnknownVisaRule {
    /// Passport nationality of the traveler.
    pub nationality: CountryCode,
    /// Country of entry with no rule entry.
    pub country: CountryCode,
}

/// Feasibility verdict for an ordered country sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFeasibility {
    /// Every entry along the sequence is admissible.
    Feasible,
    /// The sequence fails at `index` with the given category.
    Infeasible {
        /// Index into the country sequence where admission fails.
        index: usize,
        /// The category that caused the failure.
        category: AdmissionCategory,
    },
}

impl SequenceFeasibility {
    /// True if the sequence is feasible.
    pub fn is_feasible(&self) -> bool {
        matches!(self, SequenceFeasibility::Feasible)
    }
}

/// Immutable visa rule lookup table.
///
/// Maps (passport nationality, country of entry) to an admission
/// category. Built once from collaborator data and shared read-only
/// across searches.
#[derive(Debug, Clone, Default)]
pub struct VisaTable {
    rules: HashMap<(CountryCode, CountryCode), AdmissionCategory>,
}

impl VisaTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from an iterator of rules.
    pub fn from_rules(
        rules: impl IntoIterator<Item = (CountryCode, CountryCode, AdmissionCategory)>,
    ) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(nationality, country, category)| ((nationality, country), category))
                .collect(),
        }
    }

    /// Insert or replace a rule.
    pub fn insert(
        &mut self,
        nationality: CountryCode,
        country: CountryCode,
        category: AdmissionCategory,
    ) {
        self.rules.insert((nationality, country), category);
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify admission of `nationality` entering `country`.
    ///
    /// Entering one's own passport country is always visa-free, with or
    /// without a table entry.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVisaRule`] when the pair has no entry.
    pub fn classify(
        &self,
        nationality: CountryCode,
        country: CountryCode,
    ) -> Result<AdmissionCategory, UnknownVisaRule> {
        if nationality == country {
            return Ok(AdmissionCategory::VisaFree);
        }
        self.rules
            .get(&(nationality, country))
            .copied()
            .ok_or(UnknownVisaRule {
                nationality,
                country,
            })
    }

    /// Decide feasibility of an ordered country sequence, where the
    /// last entry is the final destination and everything before it is
    /// transit.
    ///
    /// `NoAdmission` anywhere makes the sequence infeasible.
    /// `VisaRequired` at a transit stop is infeasible unless
    /// `allow_visa_required_transit` is set; at the final destination it
    /// is feasible.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVisaRule`] on the first missing entry, rather
    /// than guessing.
    pub fn sequence_feasible(
        &self,
        nationality: CountryCode,
        countries: &[CountryCode],
        allow_visa_required_transit: bool,
    ) -> Result<SequenceFeasibility, UnknownVisaRule> {
        for (index, &country) in countries.iter().enumerate() {
            let category = self.classify(nationality, country)?;
            let is_final = index + 1 == countries.len();
            let admissible = if is_final {
                category.permits_final_entry()
            } else {
                category.permits_transit(allow_visa_required_transit)
            };
            if !admissible {
                return Ok(SequenceFeasibility::Infeasible { index, category });
            }
        }
        Ok(SequenceFeasibility::Feasible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(code: &str) -> CountryCode {
        CountryCode::parse(code).unwrap()
    }

    fn table() -> VisaTable {
        VisaTable::from_rules([
            (country("CA"), country("HK"), AdmissionCategory::VisaFree),
            (country("CA"), country("SG"), AdmissionCategory::VisaFree),
            (country("CA"), country("JP"), AdmissionCategory::VisaOnArrival),
            (country("CA"), country("IN"), AdmissionCategory::EVisa),
            (country("CA"), country("CN"), AdmissionCategory::VisaRequired),
            (country("CA"), country("KP"), AdmissionCategory::NoAdmission),
        ])
    }

    #[test]
    fn classify_known_pairs() {
        let table = table();
        assert_eq!(
            table.classify(country("CA"), country("HK")),
            Ok(AdmissionCategory::VisaFree)
        );
        assert_eq!(
            table.classify(country("CA"), country("KP")),
            Ok(AdmissionCategory::NoAdmission)
        );
    }

    #[test]
    fn classify_own_country_is_visa_free() {
        let table = VisaTable::new();
        assert_eq!(
            table.classify(country("CA"), country("CA")),
            Ok(AdmissionCategory::VisaFree)
        );
    }

    #[test]
    fn classify_missing_pair_is_unknown() {
        let table = table();
        let err = table.classify(country("CA"), country("BR")).unwrap_err();
        assert_eq!(err.nationality, country("CA"));
        assert_eq!(err.country, country("BR"));
    }

    #[test]
    fn feasible_sequence() {
        let table = table();
        let result = table
            .sequence_feasible(country("CA"), &[country("HK"), country("SG")], false)
            .unwrap();
        assert!(result.is_feasible());
    }

    #[test]
    fn no_admission_blocks_anywhere() {
        let table = table();

        // As transit
        let result = table
            .sequence_feasible(country("CA"), &[country("KP"), country("SG")], false)
            .unwrap();
        assert_eq!(
            result,
            SequenceFeasibility::Infeasible {
                index: 0,
                category: AdmissionCategory::NoAdmission,
            }
        );

        // As final destination
        let result = table
            .sequence_feasible(country("CA"), &[country("HK"), country("KP")], false)
            .unwrap();
        assert_eq!(
            result,
            SequenceFeasibility::Infeasible {
                index: 1,
                category: AdmissionCategory::NoAdmission,
            }
        );
    }

    #[test]
    fn visa_required_transit_gated_by_option() {
        let table = table();
        let sequence = [country("CN"), country("SG")];

        let disallowed = table
            .sequence_feasible(country("CA"), &sequence, false)
            .unwrap();
        assert_eq!(
            disallowed,
            SequenceFeasibility::Infeasible {
                index: 0,
                category: AdmissionCategory::VisaRequired,
            }
        );

        let allowed = table
            .sequence_feasible(country("CA"), &sequence, true)
            .unwrap();
        assert!(allowed.is_feasible());
    }

    #[test]
    fn visa_required_final_destination_is_feasible() {
        let table = table();
        let result = table
            .sequence_feasible(country("CA"), &[country("HK"), country("CN")], false)
            .unwrap();
        assert!(result.is_feasible());
    }

    #[test]
    fn visa_on_arrival_and_evisa_feasible_for_transit() {
        let table = table();
        let result = table
            .sequence_feasible(
                country("CA"),
                &[country("JP"), country("IN"), country("SG")],
                false,
            )
            .unwrap();
        assert!(result.is_feasible());
    }

    #[test]
    fn unknown_rule_propagates() {
        let table = table();
        let err = table
            .sequence_feasible(country("CA"), &[country("HK"), country("BR")], false)
            .unwrap_err();
        assert_eq!(err.country, country("BR"));
    }
}
