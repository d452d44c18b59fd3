use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Chapter VI-A sections offered on the deductions form.
///
/// Each section carries the statutory limit for display. The limit is never
/// applied to the entered amount; see [`crate::forms::DeductionsForm::over_cap_sections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeductionSection {
    Section80C,
    Section80CCD1B,
    Section80D,
    Section80DD,
    Section80DDB,
    Section80E,
    Section80EEA,
    Section80G,
    Section80GG,
    Section80TTA,
    Section80TTB,
    Section80U,
}

impl DeductionSection {
    pub const ALL: [DeductionSection; 12] = [
        Self::Section80C,
        Self::Section80CCD1B,
        Self::Section80D,
        Self::Section80DD,
        Self::Section80DDB,
        Self::Section80E,
        Self::Section80EEA,
        Self::Section80G,
        Self::Section80GG,
        Self::Section80TTA,
        Self::Section80TTB,
        Self::Section80U,
    ];

    /// Section code as written on the return and in `deductions_data`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Section80C => "80C",
            Self::Section80CCD1B => "80CCD(1B)",
            Self::Section80D => "80D",
            Self::Section80DD => "80DD",
            Self::Section80DDB => "80DDB",
            Self::Section80E => "80E",
            Self::Section80EEA => "80EEA",
            Self::Section80G => "80G",
            Self::Section80GG => "80GG",
            Self::Section80TTA => "80TTA",
            Self::Section80TTB => "80TTB",
            Self::Section80U => "80U",
        }
    }

    /// Case-insensitive; `80CCD1B` is accepted without the parentheses.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '(' | ')' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();
        let normalized = normalized.strip_prefix("SECTION").unwrap_or(&normalized);

        Self::ALL.into_iter().find(|section| {
            section
                .code()
                .chars()
                .filter(|c| !matches!(c, '(' | ')'))
                .eq(normalized.chars())
        })
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Section80C => "LIC, PPF, ELSS, EPF, principal on home loan",
            Self::Section80CCD1B => "Additional NPS contribution",
            Self::Section80D => "Health insurance premium",
            Self::Section80DD => "Maintenance of disabled dependant",
            Self::Section80DDB => "Treatment of specified diseases",
            Self::Section80E => "Interest on education loan",
            Self::Section80EEA => "Interest on affordable housing loan",
            Self::Section80G => "Donations to approved funds",
            Self::Section80GG => "Rent paid without HRA",
            Self::Section80TTA => "Savings account interest",
            Self::Section80TTB => "Deposit interest for senior citizens",
            Self::Section80U => "Taxpayer with disability",
        }
    }

    /// Statutory limit, informational only. `None` means no fixed limit.
    pub fn cap(&self) -> Option<Decimal> {
        match self {
            Self::Section80C => Some(dec!(150000)),
            Self::Section80CCD1B => Some(dec!(50000)),
            Self::Section80D => Some(dec!(25000)),
            Self::Section80DD => Some(dec!(125000)),
            Self::Section80DDB => Some(dec!(40000)),
            Self::Section80E => None,
            Self::Section80EEA => Some(dec!(150000)),
            Self::Section80G => None,
            Self::Section80GG => Some(dec!(60000)),
            Self::Section80TTA => Some(dec!(10000)),
            Self::Section80TTB => Some(dec!(50000)),
            Self::Section80U => Some(dec!(125000)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for section in DeductionSection::ALL {
            assert_eq!(DeductionSection::parse(section.code()), Some(section));
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_parentheses() {
        assert_eq!(
            DeductionSection::parse("80ccd1b"),
            Some(DeductionSection::Section80CCD1B)
        );
        assert_eq!(
            DeductionSection::parse("Section 80C"),
            Some(DeductionSection::Section80C)
        );
        assert_eq!(DeductionSection::parse("80Z"), None);
    }

    #[test]
    fn parse_does_not_confuse_prefix_codes() {
        assert_eq!(DeductionSection::parse("80D"), Some(DeductionSection::Section80D));
        assert_eq!(DeductionSection::parse("80DD"), Some(DeductionSection::Section80DD));
        assert_eq!(DeductionSection::parse("80DDB"), Some(DeductionSection::Section80DDB));
    }

    #[test]
    fn open_ended_sections_have_no_cap() {
        assert_eq!(DeductionSection::Section80E.cap(), None);
        assert_eq!(DeductionSection::Section80G.cap(), None);
        assert_eq!(DeductionSection::Section80C.cap(), Some(dec!(150000)));
    }
}
