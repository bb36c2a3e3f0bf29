use serde::Serialize;
use serde_json::{json, Value};

use crate::intake::StructuredRequirements;
use crate::FeatureVector;

/// Module template produced at project creation, before assignment. Weights
/// across one project's modules sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedModule {
    pub project_id: String,
    pub module_key: String,
    pub module_name: String,
    pub module_type: String,
    pub module_weight: f64,
    pub required_skills_vector: FeatureVector,
    pub definition_of_done: Value,
}

/// Decompose a project into the standard four delivery modules.
///
/// The split is fixed; only the integrations module varies with the intake,
/// carrying the client's integration list into its definition of done.
pub fn plan_modules_for_project(
    project_id: &str,
    structured: &StructuredRequirements,
) -> Vec<PlannedModule> {
    vec![
        PlannedModule {
            project_id: project_id.to_string(),
            module_key: "frontend".into(),
            module_name: "Frontend".into(),
            module_type: "frontend".into(),
            module_weight: 0.25,
            required_skills_vector: FeatureVector::from([
                ("react".into(), 0.9),
                ("ui".into(), 0.8),
            ]),
            definition_of_done: json!({
                "checklist": ["Client UI", "Auth", "Dashboards"],
            }),
        },
        PlannedModule {
            project_id: project_id.to_string(),
            module_key: "backend".into(),
            module_name: "Backend".into(),
            module_type: "backend".into(),
            module_weight: 0.35,
            required_skills_vector: FeatureVector::from([
                ("node".into(), 0.9),
                ("postgres".into(), 0.8),
                ("rls".into(), 0.8),
            ]),
            definition_of_done: json!({
                "checklist": ["APIs", "RLS", "Realtime"],
            }),
        },
        PlannedModule {
            project_id: project_id.to_string(),
            module_key: "integrations".into(),
            module_name: "Integrations".into(),
            module_type: "integrations".into(),
            module_weight: 0.25,
            required_skills_vector: FeatureVector::from([
                ("integrations".into(), 0.8),
                ("webhooks".into(), 0.6),
            ]),
            definition_of_done: json!({
                "integrations": structured.integrations.clone(),
            }),
        },
        PlannedModule {
            project_id: project_id.to_string(),
            module_key: "deployment".into(),
            module_name: "Deployment".into(),
            module_type: "deployment".into(),
            module_weight: 0.15,
            required_skills_vector: FeatureVector::from([
                ("devops".into(), 0.7),
                ("deployment".into(), 0.9),
            ]),
            definition_of_done: json!({
                "checklist": ["Deployment URL", "Handover notes"],
            }),
        },
    ]
}
