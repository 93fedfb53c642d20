//! Settlement limits for claim verification
//!
//! The admissible amount is capped by the billed total, the policy's
//! remaining sum insured and the sub-limit for the treatment category:
//!
//! ```text
//! max_admissible = min(total bills, remaining SI, sub-limit)
//! ```

use serde::{Deserialize, Serialize};

use core_kernel::{Money, MoneyError};

/// Bills submitted with the claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillBreakdown {
    pub consultation: Money,
    pub treatment: Money,
    pub other: Money,
}

impl BillBreakdown {
    pub fn total(&self) -> Result<Money, MoneyError> {
        self.consultation
            .checked_add(&self.treatment)?
            .checked_add(&self.other)
    }
}

/// Policy limits that apply to this claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageLimits {
    pub remaining_sum_insured: Money,
    pub sub_limit: Money,
}

/// Upper bound on the settlement amount
pub fn max_admissible(bills: &BillBreakdown, limits: &CoverageLimits) -> Result<Money, MoneyError> {
    bills
        .total()?
        .checked_min(&limits.remaining_sum_insured)?
        .checked_min(&limits.sub_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn bills() -> BillBreakdown {
        BillBreakdown {
            consultation: Money::inr(dec!(1200)),
            treatment: Money::inr(dec!(4500)),
            other: Money::inr(dec!(800)),
        }
    }

    #[test]
    fn test_sub_limit_caps_settlement() {
        let limits = CoverageLimits {
            remaining_sum_insured: Money::inr(dec!(45000)),
            sub_limit: Money::inr(dec!(5000)),
        };
        assert_eq!(bills().total().unwrap(), Money::inr(dec!(6500)));
        assert_eq!(max_admissible(&bills(), &limits).unwrap(), Money::inr(dec!(5000)));
    }

    #[test]
    fn test_remaining_sum_insured_caps_settlement() {
        let limits = CoverageLimits {
            remaining_sum_insured: Money::inr(dec!(3000)),
            sub_limit: Money::inr(dec!(5000)),
        };
        assert_eq!(max_admissible(&bills(), &limits).unwrap(), Money::inr(dec!(3000)));
    }

    proptest! {
        #[test]
        fn max_admissible_never_exceeds_any_cap(si in 0i64..100_000, sub in 0i64..100_000) {
            let limits = CoverageLimits {
                remaining_sum_insured: Money::inr(Decimal::from(si)),
                sub_limit: Money::inr(Decimal::from(sub)),
            };
            let max = max_admissible(&bills(), &limits).unwrap();
            prop_assert!(max <= bills().total().unwrap());
            prop_assert!(max <= limits.remaining_sum_insured);
            prop_assert!(max <= limits.sub_limit);
        }
    }
}
