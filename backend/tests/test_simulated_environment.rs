//! SimulatedEnvironment behaviour and full runs against it

use std::time::Duration;

use autoclicker_core_rs::environment::{BuildingSpec, EnvironmentError, EnvironmentPort};
use autoclicker_core_rs::{ManualClock, RunConfig, RunController, SimulatedConfig, SimulatedEnvironment};

fn small_store() -> SimulatedConfig {
    SimulatedConfig {
        click_yield: 1,
        price_growth: 2.0,
        starting_balance: 0,
        buildings: vec![
            BuildingSpec::new("buyCursor", 10, 1.0),
            BuildingSpec::new("buyGrandma", 50, 5.0),
        ],
        fail_every_nth_click: 0,
    }
}

#[test]
fn test_catalog_is_aligned_and_in_display_order() {
    let mut env = SimulatedEnvironment::new(small_store(), ManualClock::new()).unwrap();

    assert_eq!(env.upgrade_ids().unwrap(), vec!["buyCursor", "buyGrandma"]);
    assert_eq!(env.upgrade_prices().unwrap(), vec![10, 50]);
}

#[test]
fn test_price_grows_with_owned_units() {
    let config = SimulatedConfig {
        starting_balance: 100,
        ..small_store()
    };
    let mut env = SimulatedEnvironment::new(config, ManualClock::new()).unwrap();

    env.purchase("buyCursor").unwrap();
    env.purchase("buyCursor").unwrap();

    assert_eq!(env.owned("buyCursor"), 2);
    assert_eq!(env.price_of("buyCursor"), Some(40));
    assert_eq!(env.resource_balance(), 70);
}

#[test]
fn test_passive_production_follows_clock() {
    let clock = ManualClock::new();
    let config = SimulatedConfig {
        starting_balance: 10,
        ..small_store()
    };
    let mut env = SimulatedEnvironment::new(config, clock.clone()).unwrap();

    env.purchase("buyCursor").unwrap();
    assert_eq!(env.resource_balance(), 0);

    clock.advance(Duration::from_secs(7));
    assert_eq!(env.resource_balance(), 7);
    assert_eq!(env.final_metric().unwrap(), "cookies/second : 1.0");
}

#[test]
fn test_unaffordable_or_unknown_purchase_is_unavailable() {
    let mut env = SimulatedEnvironment::new(small_store(), ManualClock::new()).unwrap();

    assert_eq!(
        env.purchase("buyCursor"),
        Err(EnvironmentError::PurchaseUnavailable {
            id: "buyCursor".to_string()
        })
    );
    assert_eq!(
        env.purchase("buyPortal"),
        Err(EnvironmentError::PurchaseUnavailable {
            id: "buyPortal".to_string()
        })
    );
}

#[test]
fn test_run_buys_best_affordable_first() {
    let clock = ManualClock::new();
    let mut env = SimulatedEnvironment::new(small_store(), clock.clone()).unwrap();

    // 100 ticks per second of clock time
    let outcome = RunController::new(RunConfig {
        evaluation_interval_secs: 1.0,
        total_duration_secs: 3.0,
        tick_pause_millis: 10,
        ..RunConfig::default()
    })
    .unwrap()
    .run(&mut env, &clock)
    .unwrap();

    // First cycle at t=1s: 101 clicks, balance 101 -> Grandma (50) is the best buy
    assert_eq!(outcome.report.purchases[0].upgrade_id, "buyGrandma");
    assert_eq!(outcome.report.purchases[0].balance, 101);
    assert_eq!(outcome.report.evaluations, 3);
    assert!(env.owned("buyGrandma") >= 1);
    assert!(outcome.report.final_metric.is_some());
}

#[test]
fn test_injected_click_failures_are_absorbed() {
    let clock = ManualClock::new();
    let config = SimulatedConfig {
        fail_every_nth_click: 2,
        ..small_store()
    };
    let mut env = SimulatedEnvironment::new(config, clock.clone()).unwrap();

    let outcome = RunController::new(RunConfig {
        evaluation_interval_secs: 1.0,
        total_duration_secs: 2.0,
        tick_pause_millis: 100,
        ..RunConfig::default()
    })
    .unwrap()
    .run(&mut env, &clock)
    .unwrap();

    assert_eq!(outcome.report.ticks, 21);
    assert_eq!(outcome.report.skipped_ticks, 10);
    assert_eq!(env.clicks(), 21);
}
