//! RunReport, config hashing and the composition root

use autoclicker_core_rs::orchestrator::compute_config_hash;
use autoclicker_core_rs::{
    ManualClock, PolicyConfig, RunConfig, RunController, RunEvent, RunReport, SimulatedConfig,
    SimulatedEnvironment,
};

fn short_run() -> RunConfig {
    RunConfig {
        evaluation_interval_secs: 1.0,
        total_duration_secs: 4.0,
        tick_pause_millis: 50,
        policy: PolicyConfig::Greedy,
    }
}

#[test]
fn test_config_hash_is_deterministic() {
    let hash1 = compute_config_hash(&short_run()).unwrap();
    let hash2 = compute_config_hash(&short_run()).unwrap();
    assert_eq!(hash1, hash2, "Same config should produce same hash");

    let other = RunConfig {
        total_duration_secs: 5.0,
        ..short_run()
    };
    assert_ne!(hash1, compute_config_hash(&other).unwrap());
}

#[test]
fn test_config_json_field_order_does_not_matter() {
    let a = RunConfig::from_json_str(
        r#"{"evaluation_interval_secs": 2, "total_duration_secs": 30, "policy": {"type": "Greedy"}}"#,
    )
    .unwrap();
    let b = RunConfig::from_json_str(
        r#"{"policy": {"type": "Greedy"}, "total_duration_secs": 30, "evaluation_interval_secs": 2}"#,
    )
    .unwrap();

    assert_eq!(a, b);
    assert_eq!(
        compute_config_hash(&a).unwrap(),
        compute_config_hash(&b).unwrap()
    );
}

#[test]
fn test_config_json_rejects_invalid_values() {
    assert!(RunConfig::from_json_str(r#"{"evaluation_interval_secs": 0}"#).is_err());
    assert!(RunConfig::from_json_str(r#"{"policy": {"type": "Random"}}"#).is_err());
    assert!(RunConfig::from_json_str(r#"{"total_duration_secs": 1e20}"#).is_err());
    assert!(RunConfig::from_json_str(r#"{"evaluation_interval_secs": -1}"#).is_err());
}

#[test]
fn test_controller_rejects_duration_beyond_clock_range() {
    let config = RunConfig {
        total_duration_secs: 1e20,
        ..short_run()
    };
    assert!(RunController::new(config).is_err());
}

#[test]
fn test_controller_outcome_report_and_events_agree() {
    let clock = ManualClock::new();
    let mut env = SimulatedEnvironment::new(SimulatedConfig::default(), clock.clone()).unwrap();

    let controller = RunController::new(short_run()).unwrap();
    let outcome = controller.run(&mut env, &clock).unwrap();
    let report = &outcome.report;

    assert_eq!(report.policy, "greedy");
    assert_eq!(report.config_hash, compute_config_hash(controller.config()).unwrap());
    assert_eq!(report.evaluations, 4);
    assert_eq!(
        outcome.events.events_of_type("UpgradePurchased").len(),
        report.purchases.len()
    );
    assert!(matches!(
        outcome.events.events().first(),
        Some(RunEvent::RunStarted { .. })
    ));
    assert!(matches!(
        outcome.events.events().last(),
        Some(RunEvent::RunStopped { .. })
    ));
    assert!(report
        .final_metric
        .as_deref()
        .is_some_and(|m| m.starts_with("cookies/second")));
}

#[test]
fn test_report_json_round_trip_keeps_purchases() {
    let clock = ManualClock::new();
    let mut env = SimulatedEnvironment::new(SimulatedConfig::default(), clock.clone()).unwrap();
    let outcome = RunController::new(short_run())
        .unwrap()
        .run(&mut env, &clock)
        .unwrap();

    let json = outcome.report.to_json_pretty().unwrap();
    let restored: RunReport = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.run_id, outcome.report.run_id);
    assert_eq!(restored.purchased_ids(), outcome.report.purchased_ids());
    assert_eq!(restored.total_spent(), outcome.report.total_spent());
}
