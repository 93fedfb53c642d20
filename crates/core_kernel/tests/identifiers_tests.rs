//! Tests for business identifiers

use core_kernel::{ClaimNumber, IdentifierError, PaymentReference, PolicyNumber, ReferenceId};
use proptest::prelude::*;

mod claim_number {
    use super::*;

    #[test]
    fn test_from_number_pads_digits() {
        assert_eq!(ClaimNumber::from_number(12345).as_str(), "PETCLM00012345");
        assert_eq!(ClaimNumber::from_number(0).as_str(), "PETCLM00000000");
        assert_eq!(ClaimNumber::prefix(), "PETCLM");
    }

    #[test]
    fn test_parse_trims_and_uppercases() {
        let parsed: ClaimNumber = "  petclm00012312 ".parse().unwrap();
        assert_eq!(parsed, ClaimNumber::from_number(12312));
    }

    #[test]
    fn test_parse_rejects_short_codes() {
        let err = "PETCLM123".parse::<ClaimNumber>().unwrap_err();
        assert_eq!(
            err,
            IdentifierError::InvalidDigits {
                kind: "ClaimNumber",
                prefix: "PETCLM",
                digits: 8,
                value: "PETCLM123".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_letters_in_digits() {
        assert!("PETCLM0001234A".parse::<ClaimNumber>().is_err());
    }

    #[test]
    fn test_error_message_names_the_code() {
        let err = "12345".parse::<ClaimNumber>().unwrap_err();
        assert_eq!(err.to_string(), "ClaimNumber must start with 'PETCLM': 12345");
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let number = ClaimNumber::from_number(12345);
        assert_eq!(serde_json::to_value(&number).unwrap(), "PETCLM00012345");

        let back: ClaimNumber = serde_json::from_value(serde_json::json!("PETCLM00012345")).unwrap();
        assert_eq!(back, number);
        assert!(serde_json::from_value::<ClaimNumber>(serde_json::json!("CLM-1")).is_err());
    }
}

mod other_codes {
    use super::*;

    #[test]
    fn test_policy_and_reference_shapes() {
        assert_eq!(PolicyNumber::from_number(89234).to_string(), "PETPOL00089234");
        assert_eq!(ReferenceId::from_number(760).to_string(), "DMAG0000760");
    }

    #[test]
    fn test_codes_do_not_cross_parse() {
        assert!("PETPOL00089234".parse::<ClaimNumber>().is_err());
        assert!("PETCLM00012345".parse::<PolicyNumber>().is_err());
    }

    #[test]
    fn test_generated_payment_reference() {
        let reference = PaymentReference::generate();
        assert!(reference.as_str().starts_with("TXN"));
        assert_eq!(reference.as_str().len(), 13);
        assert_eq!(reference.as_str().parse::<PaymentReference>().unwrap(), reference);
    }
}

proptest! {
    #[test]
    fn display_then_parse_keeps_the_number(n in 0u64..100_000_000u64) {
        let number = ClaimNumber::from_number(n);
        let parsed: ClaimNumber = number.to_string().parse().unwrap();
        prop_assert_eq!(parsed.number(), n);
    }
}
