//! Hazard risk matrix.
//!
//! ```text
//!                  improbable   possible/unknown   probable
//! intolerable      high         critical           critical
//! unacceptable     medium       high               high
//! tolerable        medium       medium             high
//! acceptable/unk.  low          low                medium
//! ```

use crate::enums::{HazardImpact, HazardLikelihood, RiskLevel};

/// Map an impact and likelihood to a risk level.
#[must_use]
pub const fn classify(impact: HazardImpact, likelihood: HazardLikelihood) -> RiskLevel {
    let improbable = matches!(likelihood, HazardLikelihood::Improbable);
    let probable = matches!(likelihood, HazardLikelihood::Probable);
    match impact {
        HazardImpact::Intolerable => {
            if improbable {
                RiskLevel::High
            } else {
                RiskLevel::Critical
            }
        }
        HazardImpact::Unacceptable => {
            if improbable {
                RiskLevel::Medium
            } else {
                RiskLevel::High
            }
        }
        HazardImpact::Tolerable => {
            if probable {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            }
        }
        HazardImpact::Acceptable | HazardImpact::Unknown => {
            if probable {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use HazardImpact as I;
    use HazardLikelihood as L;
    use RiskLevel as R;

    #[rstest]
    #[case(I::Intolerable, L::Improbable, R::High)]
    #[case(I::Intolerable, L::Possible, R::Critical)]
    #[case(I::Intolerable, L::Unknown, R::Critical)]
    #[case(I::Intolerable, L::Probable, R::Critical)]
    #[case(I::Unacceptable, L::Improbable, R::Medium)]
    #[case(I::Unacceptable, L::Possible, R::High)]
    #[case(I::Unacceptable, L::Unknown, R::High)]
    #[case(I::Unacceptable, L::Probable, R::High)]
    #[case(I::Tolerable, L::Improbable, R::Medium)]
    #[case(I::Tolerable, L::Possible, R::Medium)]
    #[case(I::Tolerable, L::Unknown, R::Medium)]
    #[case(I::Tolerable, L::Probable, R::High)]
    #[case(I::Acceptable, L::Improbable, R::Low)]
    #[case(I::Acceptable, L::Possible, R::Low)]
    #[case(I::Acceptable, L::Unknown, R::Low)]
    #[case(I::Acceptable, L::Probable, R::Medium)]
    #[case(I::Unknown, L::Improbable, R::Low)]
    #[case(I::Unknown, L::Possible, R::Low)]
    #[case(I::Unknown, L::Unknown, R::Low)]
    #[case(I::Unknown, L::Probable, R::Medium)]
    fn matrix(#[case] impact: I, #[case] likelihood: L, #[case] expected: R) {
        assert_eq!(classify(impact, likelihood), expected);
    }
}
