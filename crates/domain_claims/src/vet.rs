//! Vet investigation records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The vet's view of whether treatment was necessary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicalAssessment {
    #[serde(rename = "Medically Justified")]
    MedicallyJustified,
    #[serde(rename = "Partially Justified")]
    PartiallyJustified,
    #[serde(rename = "Not Justified")]
    NotJustified,
}

/// The vet's recommendation to the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VetRecommendation {
    Approve,
    Reject,
    #[serde(rename = "Partial Approval")]
    PartialApproval,
}

/// Findings entered by the investigating vet
///
/// Assessment and recommendation stay `None` until the vet picks one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetFindings {
    pub assessment: Option<MedicalAssessment>,
    pub comments: String,
    pub recommendation: Option<VetRecommendation>,
    #[serde(default)]
    pub uploaded_files: Vec<String>,
}

/// Pet under investigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetProfile {
    pub name: String,
    pub breed: String,
    pub age: String,
    pub claim_type: String,
}

/// What happened and where the pet was treated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentSummary {
    pub description: String,
    pub incident_date: NaiveDate,
    pub vet_visit_date: NaiveDate,
    pub clinic_name: String,
}

/// A file the vet is asked to review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedFile {
    pub name: String,
    pub file_type: String,
}

/// Everything the vet sees when the case is referred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetCase {
    pub pet: PetProfile,
    pub incident: IncidentSummary,
    pub documents: Vec<ReviewedFile>,
}
