//! Arbitrage simulation math.
//!
//! Pure functions over floating-point BRL amounts. No currency rounding
//! happens here; presentation layers round for display only. Input
//! validation is the caller's job (see `service`).

use braitsure_core::{PricedExchange, SimulationResult};

/// Fee fraction charged by the resale venue on the BRL proceeds.
pub const RESALE_FEE_FRACTION: f64 = 0.002;

/// Simulate a buy-and-resell cycle on every exchange.
///
/// One result per input rate, order-preserving. Exchanges without a
/// usable buy price produce an all-null row.
pub fn simulate_all(
    amount: f64,
    rates: &[PricedExchange],
    resale_price: f64,
) -> Vec<SimulationResult> {
    rates
        .iter()
        .map(|rate| simulate_one(amount, rate, resale_price))
        .collect()
}

fn simulate_one(amount: f64, rate: &PricedExchange, resale_price: f64) -> SimulationResult {
    let Some(buy_price) = rate.buy_price else {
        return SimulationResult::unavailable(rate.exchange, amount);
    };
    if !buy_price.is_finite() || buy_price <= 0.0 {
        return SimulationResult::unavailable(rate.exchange, amount);
    }

    let units_bought = amount / buy_price;
    let units_after_fee = units_bought * (1.0 - rate.fee_fraction);
    let gross_proceeds = units_after_fee * resale_price;
    let net_proceeds = gross_proceeds * (1.0 - RESALE_FEE_FRACTION);
    let profit = net_proceeds - amount;

    SimulationResult {
        exchange: rate.exchange,
        initial_amount: amount,
        buy_price: Some(buy_price),
        units_after_fee: Some(units_after_fee),
        final_amount: Some(net_proceeds),
        profit: Some(profit),
        profit_percentage: Some(profit / amount * 100.0),
    }
}

/// Pick the best row: the strictly greatest positive profit.
///
/// Rows without a profit are never best; a tie resolves to the first
/// such row in input order. Returns `None` when no row is profitable.
pub fn best_option(results: &[SimulationResult]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, result) in results.iter().enumerate() {
        let Some(profit) = result.profit else {
            continue;
        };
        if profit <= 0.0 {
            continue;
        }
        match best {
            Some((_, held)) if held >= profit => {}
            _ => best = Some((index, profit)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use braitsure_core::Exchange;
    use pretty_assertions::assert_eq;

    fn priced(exchange: Exchange, buy_price: Option<f64>, fee_fraction: f64) -> PricedExchange {
        PricedExchange {
            exchange,
            fee_fraction,
            buy_price,
        }
    }

    fn row(exchange: Exchange, profit: Option<f64>) -> SimulationResult {
        SimulationResult {
            profit,
            profit_percentage: profit.map(|p| p / 10.0),
            ..SimulationResult::unavailable(exchange, 1000.0)
        }
    }

    #[test]
    fn test_worked_example() {
        // amount=5000, buy=5.20, fee=0.001, resale=5.25, resale fee=0.002
        let rates = [priced(Exchange::Binance, Some(5.20), 0.001)];
        let results = simulate_all(5000.0, &rates, 5.25);
        assert_eq!(results.len(), 1);
        let result = &results[0];

        let units_bought = 5000.0 / 5.20;
        let units_after_fee = units_bought * 0.999;
        let net = units_after_fee * 5.25 * 0.998;
        let profit = net - 5000.0;

        let got_units = result.units_after_fee.unwrap();
        let got_profit = result.profit.unwrap();
        assert!((got_units - units_after_fee).abs() / units_after_fee < 1e-9);
        assert!((got_profit - profit).abs() / profit.abs() < 1e-9);
        assert!((got_profit - 32.9427884615).abs() < 1e-6);
        assert!((result.profit_percentage.unwrap() - 0.6588557692).abs() < 1e-6);
        assert!((result.final_amount.unwrap() - 5032.9427884615).abs() < 1e-6);
    }

    #[test]
    fn test_null_buy_price_yields_null_row() {
        let rates = [
            priced(Exchange::Binance, Some(5.2), 0.001),
            priced(Exchange::Bybit, None, 0.001),
        ];
        let results = simulate_all(5000.0, &rates, 5.25);
        assert_eq!(results.len(), 2);
        assert!(results[0].profit.is_some());
        assert_eq!(results[1], SimulationResult::unavailable(Exchange::Bybit, 5000.0));
    }

    #[test]
    fn test_non_finite_buy_price_treated_as_unavailable() {
        let rates = [
            priced(Exchange::Binance, Some(f64::NAN), 0.001),
            priced(Exchange::Bybit, Some(0.0), 0.001),
            priced(Exchange::KuCoin, Some(-5.2), 0.001),
        ];
        for result in simulate_all(5000.0, &rates, 5.25) {
            assert!(result.profit.is_none());
        }
    }

    #[test]
    fn test_order_preserved() {
        let rates = [
            priced(Exchange::Coinbase, Some(5.3), 0.005),
            priced(Exchange::Binance, Some(5.2), 0.001),
        ];
        let results = simulate_all(1000.0, &rates, 5.25);
        assert_eq!(results[0].exchange, Exchange::Coinbase);
        assert_eq!(results[1].exchange, Exchange::Binance);
    }

    #[test]
    fn test_best_option_tie_goes_to_first() {
        let rows = [
            row(Exchange::Binance, Some(12.0)),
            row(Exchange::Bybit, Some(-5.0)),
            row(Exchange::KuCoin, Some(12.0)),
            row(Exchange::Coinbase, None),
        ];
        assert_eq!(best_option(&rows), Some(0));
    }

    #[test]
    fn test_best_option_requires_positive_profit() {
        let rows = [
            row(Exchange::Binance, Some(-3.0)),
            row(Exchange::Bybit, Some(0.0)),
            row(Exchange::KuCoin, None),
        ];
        assert_eq!(best_option(&rows), None);
    }

    #[test]
    fn test_best_option_picks_greatest() {
        let rows = [
            row(Exchange::Binance, Some(3.0)),
            row(Exchange::Bybit, Some(14.5)),
            row(Exchange::KuCoin, Some(7.0)),
        ];
        assert_eq!(best_option(&rows), Some(1));
    }

    #[test]
    fn test_best_option_empty() {
        assert_eq!(best_option(&[]), None);
    }
}
