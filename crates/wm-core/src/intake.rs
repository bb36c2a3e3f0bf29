use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date::{normalize_launch_date, NormalizedLaunchDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    WebApp,
    MobileApp,
    Website,
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectScope {
    Small,
    Medium,
    Large,
}

/// Raw client intake form. Everything is optional at this stage; validation
/// decides what is actually required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectIntake {
    pub product_type: Option<ProductType>,
    pub industry: Option<String>,
    pub urgency: Option<UrgencyLevel>,
    pub launch_date: Option<String>,
    pub features: Vec<String>,
    pub integrations: Option<Vec<String>>,
    pub notes: Option<String>,
    pub brand_refs: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum IntakeError {
    #[error("intake is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// Derived, validated form of the intake that downstream engines consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredRequirements {
    pub product_type: ProductType,
    pub industry: String,
    pub urgency: UrgencyLevel,
    pub launch_date: Option<NormalizedLaunchDate>,
    pub features: Vec<String>,
    pub integrations: Vec<String>,
    pub scope: ProjectScope,
    /// Feeds the pricing quote as `complexity_score`.
    pub complexity_score: f64,
}

/// Check the form for required fields, reporting every gap at once so the
/// client fixes one round trip, not five.
pub fn validate_intake(intake: &ProjectIntake) -> Result<(), IntakeError> {
    let mut missing = Vec::new();

    if intake.product_type.is_none() {
        missing.push("product_type".to_string());
    }
    if intake.urgency.is_none() {
        missing.push("urgency".to_string());
    }
    if intake.features.is_empty() {
        missing.push("features".to_string());
    }
    if intake.integrations.is_none() {
        missing.push("integrations".to_string());
    }
    if intake.notes.as_deref().map_or(true, |n| n.trim().is_empty()) {
        missing.push("notes".to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IntakeError::MissingFields(missing))
    }
}

/// Validate and map the intake into structured requirements.
///
/// Complexity grows 6 points per feature and 8 per integration on a base of
/// 10, saturating at 100. Scope buckets on feature count alone.
pub fn intake_to_structured_requirements(
    intake: &ProjectIntake,
    intake_at: DateTime<Utc>,
) -> Result<StructuredRequirements, IntakeError> {
    validate_intake(intake)?;

    let features = intake.features.clone();
    let integrations = intake.integrations.clone().unwrap_or_default();

    let complexity_score =
        ((10 + features.len() * 6 + integrations.len() * 8) as f64).min(100.0);
    let scope = if features.len() >= 10 {
        ProjectScope::Large
    } else if features.len() >= 5 {
        ProjectScope::Medium
    } else {
        ProjectScope::Small
    };

    Ok(StructuredRequirements {
        // validate_intake checked these two
        product_type: intake.product_type.unwrap_or(ProductType::WebApp),
        urgency: intake.urgency.unwrap_or(UrgencyLevel::Medium),
        industry: intake
            .industry
            .clone()
            .unwrap_or_else(|| "general".to_string()),
        launch_date: intake
            .launch_date
            .as_deref()
            .and_then(|raw| normalize_launch_date(raw, intake_at)),
        features,
        integrations,
        scope,
        complexity_score,
    })
}
