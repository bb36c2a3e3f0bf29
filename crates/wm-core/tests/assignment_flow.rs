//! End-to-end pass over the engine chain the orchestrator drives: intake,
//! module planning, assignment, pricing, a work submission, risk evaluation
//! and settlement, with every collaborator stubbed in memory.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use serde_json::json;

use wm_core::assignment::plan_assignments_for_module;
use wm_core::contribution::{apply_payout, PayoutContext};
use wm_core::intake::{intake_to_structured_requirements, ProductType, ProjectIntake, UrgencyLevel};
use wm_core::planner::plan_modules_for_project;
use wm_core::pricing::{calculate_dynamic_price, PricingInput};
use wm_core::risk::{evaluate_risk, RiskInput};
use wm_core::shift::ShiftClock;
use wm_core::snapshot::{create_snapshot, SnapshotInput, SnapshotRecord, SnapshotStore};
use wm_core::{FeatureVector, FreelancerProfile, ModuleStatus, ProjectModule, TaskLog};

fn ist(h: u32) -> DateTime<Utc> {
    FixedOffset::east_opt(5 * 3600 + 30 * 60)
        .unwrap()
        .with_ymd_and_hms(2026, 3, 10, h, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn backend_specialist(id: &str, node: f64) -> FreelancerProfile {
    FreelancerProfile {
        id: id.into(),
        specialty_tags: vec!["backend".into()],
        skill_vector: FeatureVector::from([
            ("node".into(), node),
            ("postgres".into(), 0.8),
            ("rls".into(), 0.8),
        ]),
        reliability_score: 1.1,
        availability_score: 1.0,
        wallet_balance: 500.0,
        ..FreelancerProfile::default()
    }
}

#[derive(Default)]
struct MemoryStore {
    snapshots: Vec<SnapshotRecord>,
    statuses: Vec<(String, ModuleStatus)>,
}

impl SnapshotStore for MemoryStore {
    type Error = &'static str;

    fn latest_version(&self, module_id: &str) -> Result<u32, Self::Error> {
        Ok(self
            .snapshots
            .iter()
            .filter(|s| s.module_id == module_id)
            .map(|s| s.version_no)
            .max()
            .unwrap_or(0))
    }

    fn persist(
        &mut self,
        snapshot: wm_core::snapshot::NewSnapshot,
    ) -> Result<SnapshotRecord, Self::Error> {
        let record = SnapshotRecord {
            id: format!("snap-{}", self.snapshots.len() + 1),
            module_id: snapshot.module_id,
            freelancer_id: snapshot.freelancer_id,
            version_no: snapshot.version_no,
            work_summary: snapshot.work_summary,
            structured_progress: snapshot.structured_progress,
            file_references: snapshot.file_references,
            created_at: ist(12),
        };
        self.snapshots.push(record.clone());
        Ok(record)
    }

    fn set_module_status(
        &mut self,
        module_id: &str,
        status: ModuleStatus,
    ) -> Result<(), Self::Error> {
        self.statuses.push((module_id.to_string(), status));
        Ok(())
    }
}

#[test]
fn intake_to_settlement_round_trip() {
    let now = ist(11);

    // Client intake arrives and maps to structured requirements.
    let intake = ProjectIntake {
        product_type: Some(ProductType::WebApp),
        urgency: Some(UrgencyLevel::High),
        launch_date: Some("late September".into()),
        features: vec!["auth".into(), "catalog".into(), "checkout".into(), "admin".into()],
        integrations: Some(vec!["razorpay".into()]),
        notes: Some("Marketplace MVP for a retail chain.".into()),
        ..ProjectIntake::default()
    };
    let structured = intake_to_structured_requirements(&intake, now).unwrap();
    assert_eq!(structured.complexity_score, 42.0); // 10 + 4*6 + 1*8

    // The project decomposes into the standard modules.
    let planned = plan_modules_for_project("proj-1", &structured);
    let backend_template = planned.iter().find(|m| m.module_key == "backend").unwrap();

    let module = ProjectModule {
        id: "mod-backend".into(),
        project_id: "proj-1".into(),
        module_key: backend_template.module_key.clone(),
        module_name: backend_template.module_name.clone(),
        module_vector: backend_template.required_skills_vector.clone(),
        module_weight: backend_template.module_weight,
        expected_progress_rate: 0.1,
        due_at: Some(now + Duration::days(14)),
        ..ProjectModule::default()
    };

    // Assignment picks the strongest backend specialist, with a backup.
    let pool = vec![
        backend_specialist("fl-strong", 0.9),
        backend_specialist("fl-backup", 0.5),
    ];
    let plan = plan_assignments_for_module(&module, &pool, &ShiftClock::ist(), now);
    assert_eq!(plan.primary_freelancer_id.as_deref(), Some("fl-strong"));
    assert_eq!(plan.backup_freelancer_id.as_deref(), Some("fl-backup"));
    assert_eq!(plan.reason, "auto:A");
    assert_eq!(wm_core::date::hours_between(plan.shift_start, plan.shift_end), 9.0);

    // The client quote builds on the derived complexity.
    let quote = calculate_dynamic_price(&PricingInput {
        complexity_score: structured.complexity_score,
        base_rate: 100.0,
        urgency_amount: 500.0,
        resource_load_amount: 200.0,
        integration_amount: 150.0,
        active_projects: 1250,
        capacity_threshold: 1000,
    });
    assert_eq!(quote.base, 4200.0);
    assert!((quote.surge - 4200.0 * 0.25).abs() < 1e-9);

    // First work submission: version 1, module flips to handoff.
    let mut store = MemoryStore::default();
    let snapshot = create_snapshot(
        SnapshotInput {
            module_id: module.id.clone(),
            freelancer_id: "fl-strong".into(),
            work_summary: "schema and auth endpoints done".into(),
            structured_progress: json!({"progress": 0.3}),
            file_references: vec!["schema.sql".into()],
        },
        &mut store,
    )
    .unwrap();
    assert_eq!(snapshot.version_no, 1);
    assert_eq!(
        store.statuses,
        vec![("mod-backend".to_string(), ModuleStatus::Handoff)]
    );

    // Risk right after a submission is calm.
    let evaluation = evaluate_risk(
        &RiskInput {
            module_id: module.id.clone(),
            project_id: module.project_id.clone(),
            freelancer_id: Some("fl-strong".into()),
            last_snapshot_at: Some(snapshot.created_at),
            max_snapshot_delay_minutes: 240,
            progress: 0.3,
            expected_progress: 0.2,
            due_at: module.due_at,
        },
        ist(13),
    );
    assert_eq!(evaluation.score, 0.0);

    // Settlement: persist then wallet update with the absolute new balance.
    let log = TaskLog {
        id: "log-1".into(),
        module_id: module.id.clone(),
        freelancer_id: "fl-strong".into(),
        time_spent_minutes: 300,
        completion_percentage: 0.3,
        ai_quality_score: 0.9,
        penalties: 0.0,
    };
    let mut persisted = false;
    let mut new_balance = None;
    let payout = apply_payout::<&str>(
        &log,
        &PayoutContext {
            module_weight: module.module_weight,
            reliability_multiplier: 1.1,
        },
        &pool[0],
        |_| {
            persisted = true;
            Ok(())
        },
        |_, balance| {
            new_balance = Some(balance);
            Ok(())
        },
    )
    .unwrap();

    assert!(persisted);
    assert!((payout.gross_amount - 0.35 * 0.3).abs() < 1e-9);
    assert!((new_balance.unwrap() - (500.0 + payout.payout_amount)).abs() < 1e-9);
}

#[test]
fn planning_failures_stay_per_module() {
    // A module nobody can staff yields an unstaffed plan; its siblings in the
    // same project still get planned normally.
    let now = ist(11);
    let pool = vec![backend_specialist("fl-1", 0.9)];

    let staffed = ProjectModule {
        id: "mod-backend".into(),
        module_key: "backend".into(),
        module_vector: FeatureVector::from([("node".into(), 0.9)]),
        ..ProjectModule::default()
    };
    let unstaffable = ProjectModule {
        id: "mod-frontend".into(),
        module_key: "frontend".into(),
        module_vector: FeatureVector::from([("react".into(), 0.9)]),
        ..ProjectModule::default()
    };

    let plans: Vec<_> = [&staffed, &unstaffable]
        .into_iter()
        .map(|m| plan_assignments_for_module(m, &pool, &ShiftClock::ist(), now))
        .collect();

    assert_eq!(plans[0].primary_freelancer_id.as_deref(), Some("fl-1"));
    assert_eq!(plans[1].primary_freelancer_id, None);
    assert_eq!(plans[1].module_id, "mod-frontend");
}
