//! Admissibility checklist and payee account verification

use serde::{Deserialize, Serialize};

/// Outcome of one eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

/// One line of the eligibility checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub value: String,
    pub status: CheckStatus,
}

impl ChecklistItem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        status: CheckStatus,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: value.into(),
            status,
        }
    }
}

/// How closely the payee account name matches the policyholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameMatch {
    Complete,
    Partial,
    Mismatch,
}

impl NameMatch {
    /// Compares two names token by token, ignoring case and punctuation
    ///
    /// Identical token lists match completely. When every token of the
    /// shorter name appears in the longer one (a middle name added or
    /// dropped), the match is partial.
    pub fn evaluate(policy_holder: &str, account_holder: &str) -> Self {
        let left = tokens(policy_holder);
        let right = tokens(account_holder);

        if left.is_empty() || right.is_empty() {
            return NameMatch::Mismatch;
        }
        if left == right {
            return NameMatch::Complete;
        }

        let (shorter, longer) = if left.len() <= right.len() {
            (&left, &right)
        } else {
            (&right, &left)
        };
        if shorter.iter().all(|token| longer.contains(token)) {
            NameMatch::Partial
        } else {
            NameMatch::Mismatch
        }
    }
}

fn tokens(name: &str) -> Vec<String> {
    name.split(|c: char| c.is_whitespace() || c == '.' || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Payee account check shown next to the checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountVerification {
    pub policy_holder_name: String,
    pub bank_account_name: String,
    pub name_match: NameMatch,
}

impl AccountVerification {
    pub fn new(policy_holder_name: impl Into<String>, bank_account_name: impl Into<String>) -> Self {
        let policy_holder_name = policy_holder_name.into();
        let bank_account_name = bank_account_name.into();
        let name_match = NameMatch::evaluate(&policy_holder_name, &bank_account_name);
        Self {
            policy_holder_name,
            bank_account_name,
            name_match,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_match() {
        assert_eq!(NameMatch::evaluate("Arjun Mehta", "arjun  mehta"), NameMatch::Complete);
        assert_eq!(NameMatch::evaluate("Arjun Mehta", "Arjun Kumar Mehta"), NameMatch::Partial);
        assert_eq!(NameMatch::evaluate("Arjun Mehta", "Priya Sharma"), NameMatch::Mismatch);
        assert_eq!(NameMatch::evaluate("", "Arjun"), NameMatch::Mismatch);
    }

    #[test]
    fn test_account_verification_computes_match() {
        let account = AccountVerification::new("Arjun Mehta", "Arjun Kumar Mehta");
        assert_eq!(account.name_match, NameMatch::Partial);
    }
}
