//! Property-based tests for risk statistic invariants.
//!
//! These tests verify properties that should hold for any well-formed input:
//! - Normalized weights sum to 1
//! - VaR lies within the range of observed returns
//! - Volatility is non-negative and zero only for a flat series
//! - Maximum drawdown is non-positive and zero only for a non-decreasing path
//! - The risk score is bounded in [0, 1]
//! - Scaling all quantities does not change the result

use approx::assert_relative_eq;
use proptest::prelude::*;
use riskline_core::{PortfolioReturnSeries, PriceTable, Symbol};
use riskline_risk::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

/// Period returns bounded away from a total loss.
fn returns_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.5f64..0.5, 1..200)
}

/// Positive price paths for a fixed number of symbols.
fn price_table_strategy(symbols: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (2usize..60).prop_flat_map(move |len| {
        prop::collection::vec(prop::collection::vec(1.0f64..1000.0, len), symbols)
    })
}

fn symbols(n: usize) -> Vec<Symbol> {
    (0..n)
        .map(|i| Symbol::new(format!("SYM{}", i)).unwrap())
        .collect()
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn property_normalized_weights_sum_to_one(
        raw in prop::collection::vec(0.01f64..1000.0, 1..20)
    ) {
        let syms = symbols(raw.len());
        let weights: Vec<_> = syms.into_iter().zip(raw).collect();

        let normalized = normalize_weights(&weights).unwrap();
        let total: f64 = normalized.iter().map(|(_, w)| w).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn property_var_within_observed_range(returns in returns_strategy()) {
        let var = historical_var(&returns).unwrap();
        let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
        let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(var >= min - 1e-15);
        prop_assert!(var <= max + 1e-15);
    }

    #[test]
    fn property_volatility_non_negative(returns in returns_strategy()) {
        let vol = population_std_dev(&returns).unwrap();
        prop_assert!(vol >= 0.0);

        let flat = returns.iter().all(|r| *r == returns[0]);
        prop_assert_eq!(vol == 0.0, flat);
    }

    #[test]
    fn property_drawdown_non_positive(returns in returns_strategy()) {
        let mdd = max_drawdown(&returns).unwrap();
        prop_assert!(mdd <= 0.0);
        prop_assert!(mdd >= -1.0);
    }

    #[test]
    fn property_drawdown_zero_for_gains(
        returns in prop::collection::vec(0.0f64..0.5, 1..200)
    ) {
        prop_assert_eq!(max_drawdown(&returns).unwrap(), 0.0);
    }

    #[test]
    fn property_drawdown_negative_after_any_loss(
        returns in returns_strategy(),
        loss in -0.5f64..-1e-6,
        at in any::<prop::sample::Index>(),
    ) {
        let mut returns = returns;
        let pos = at.index(returns.len() + 1);
        returns.insert(pos, loss);

        prop_assert!(max_drawdown(&returns).unwrap() < 0.0);
    }

    #[test]
    fn property_score_bounded(returns in returns_strategy()) {
        let summary = compute_risk(&PortfolioReturnSeries::new(returns)).unwrap();
        prop_assert!(summary.is_finite());
        prop_assert!(summary.risk_score >= 0.0);
        prop_assert!(summary.risk_score <= 1.0);
    }

    #[test]
    fn property_quantity_scaling_invariant(
        columns in price_table_strategy(3),
        qty in prop::collection::vec(0.1f64..100.0, 3),
        scale in 0.01f64..1000.0,
    ) {
        let syms = symbols(3);
        let table = PriceTable::from_closes(syms.iter().cloned().zip(columns)).unwrap();

        let base: Vec<_> = syms.iter().cloned().zip(qty.iter().copied()).collect();
        let scaled: Vec<_> = syms.iter().cloned().zip(qty.iter().map(|q| q * scale)).collect();

        let a = build_portfolio_returns(&table, &base).unwrap();
        let b = build_portfolio_returns(&table, &scaled).unwrap();

        prop_assert_eq!(a.len(), table.len() - 1);
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn property_constant_prices_have_zero_risk(
        price in 1.0f64..1000.0,
        len in 2usize..50,
        qty in 0.1f64..100.0,
    ) {
        let sym = Symbol::new("FLAT").unwrap();
        let table = PriceTable::from_closes([(sym.clone(), vec![price; len])]).unwrap();
        let returns = build_portfolio_returns(&table, &[(sym, qty)]).unwrap();
        let summary = compute_risk(&returns).unwrap();

        prop_assert_eq!(summary.var_95, 0.0);
        prop_assert_eq!(summary.volatility, 0.0);
        prop_assert_eq!(summary.max_drawdown, 0.0);
        prop_assert_eq!(summary.risk_score, 0.0);
    }
}

#[test]
fn property_single_period_var_is_that_return() {
    for r in [-0.25, -0.01, 0.0, 0.03] {
        let summary = compute_risk(&PortfolioReturnSeries::new(vec![r])).unwrap();
        assert_eq!(summary.var_95, r);
        assert_eq!(summary.volatility, 0.0);
    }
}
