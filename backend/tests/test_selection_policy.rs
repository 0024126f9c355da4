//! Selection policy properties
//!
//! Greedy selection must pick the id paired with the highest price strictly
//! below the balance, collapsing same-price entries so the later one wins.

use autoclicker_core_rs::policy::{affordable_upgrades, select_upgrade, GreedyPolicy, SelectionPolicy};
use autoclicker_core_rs::Catalog;
use proptest::prelude::*;

fn catalog(ids: &[&str], prices: &[u64]) -> Catalog {
    Catalog::from_parts(ids.iter().map(|s| s.to_string()).collect(), prices.to_vec()).unwrap()
}

/// Catalog with unique ids `u0, u1, ...` and prices drawn from a small
/// range so duplicates are common.
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(0u64..50, 0..12).prop_map(|prices| {
        let ids = (0..prices.len()).map(|i| format!("u{}", i)).collect();
        Catalog::from_parts(ids, prices).unwrap()
    })
}

#[test]
fn test_duplicate_price_later_entry_wins() {
    let c = catalog(&["a", "b"], &[10, 10]);
    assert_eq!(select_upgrade(11, &c), Some("b"));
}

#[test]
fn test_price_equal_to_balance_never_selected() {
    let c = catalog(&["a"], &[10]);
    assert_eq!(select_upgrade(10, &c), None);
}

#[test]
fn test_greedy_policy_matches_free_function() {
    let c = catalog(&["buyCursor", "buyGrandma", "buyFactory"], &[15, 100, 500]);
    let policy = GreedyPolicy::new();

    for balance in [0, 15, 16, 100, 101, 499, 500, 501] {
        assert_eq!(
            policy.select(balance, &c).as_deref(),
            select_upgrade(balance, &c),
            "balance {}",
            balance
        );
    }
    assert_eq!(policy.name(), "greedy");
}

#[test]
fn test_collapsed_entry_can_hide_an_affordable_id() {
    // "a" and "c" share a price; only "c" survives in the affordable set
    let c = catalog(&["a", "b", "c"], &[4, 2, 4]);
    let affordable = affordable_upgrades(5, &c);

    assert_eq!(affordable.len(), 2);
    assert!(!affordable.values().any(|id| *id == "a"));
    assert_eq!(select_upgrade(5, &c), Some("c"));
}

proptest! {
    #[test]
    fn prop_nothing_below_balance_selects_none(c in arb_catalog(), slack in 0u64..10) {
        let min_price = c.iter().map(|u| u.price).min().unwrap_or(0);
        let balance = min_price.saturating_sub(slack);
        prop_assert_eq!(select_upgrade(balance, &c), None);
    }

    #[test]
    fn prop_selects_last_id_with_max_affordable_price(c in arb_catalog(), balance in 0u64..60) {
        let best_price = c.iter().map(|u| u.price).filter(|p| *p < balance).max();

        match best_price {
            None => prop_assert_eq!(select_upgrade(balance, &c), None),
            Some(price) => {
                let expected = c
                    .iter()
                    .filter(|u| u.price == price)
                    .last()
                    .map(|u| u.id.as_str());
                prop_assert_eq!(select_upgrade(balance, &c), expected);
            }
        }
    }

    #[test]
    fn prop_affordable_set_is_strictly_below_balance(c in arb_catalog(), balance in 0u64..60) {
        for (price, id) in affordable_upgrades(balance, &c) {
            prop_assert!(price < balance);
            prop_assert_eq!(c.iter().filter(|u| u.price == price).last().map(|u| u.id.as_str()), Some(id));
        }
    }
}
