//! Payout details and receipts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{format_console_timestamp, Money, PaymentReference};

/// Totals shown on the payment panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutSummary {
    pub total_submitted: Money,
    pub total_approved: Money,
    pub deductibles: Money,
    pub non_payables: Money,
}

/// Payee bank account, with the account number already masked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
}

impl BankDetails {
    /// True when the account is held by the claim's owner
    pub fn held_by(&self, owner_name: &str) -> bool {
        self.account_holder_name == owner_name
    }

    /// Masks all but the last four digits of an account number
    pub fn mask(account_number: &str) -> String {
        let digits: Vec<char> = account_number.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        let tail: String = digits.iter().skip(digits.len().saturating_sub(4)).collect();
        format!("****{}", tail)
    }
}

/// Confirmation of a processed payout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub amount: Money,
    pub reference: PaymentReference,
    pub paid_to: String,
    pub paid_at: DateTime<Utc>,
}

impl PaymentReceipt {
    /// Issues a receipt for a payout to the given account
    pub fn issue(amount: Money, bank: &BankDetails) -> Self {
        Self {
            amount,
            reference: PaymentReference::generate(),
            paid_to: format!("{} - {}", bank.bank_name, bank.account_number),
            paid_at: Utc::now(),
        }
    }

    /// Payment time as the console shows it
    pub fn display_time(&self) -> String {
        format_console_timestamp(self.paid_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn hdfc() -> BankDetails {
        BankDetails {
            account_holder_name: "Arjun Mehta".to_string(),
            account_number: BankDetails::mask("50100012345678"),
            ifsc_code: "HDFC000123".to_string(),
            bank_name: "HDFC Bank".to_string(),
        }
    }

    #[test]
    fn test_mask_keeps_last_four() {
        assert_eq!(BankDetails::mask("50100012345678"), "****5678");
        assert_eq!(BankDetails::mask("12"), "****12");
    }

    #[test]
    fn test_receipt_pays_masked_account() {
        let receipt = PaymentReceipt::issue(Money::inr(dec!(4200)), &hdfc());
        assert_eq!(receipt.paid_to, "HDFC Bank - ****5678");
        assert!(receipt.reference.as_str().starts_with("TXN"));
        assert_eq!(receipt.reference.as_str().len(), 13);
    }

    #[test]
    fn test_name_match_on_owner() {
        assert!(hdfc().held_by("Arjun Mehta"));
        assert!(!hdfc().held_by("Arjun Kumar Mehta"));
    }
}
