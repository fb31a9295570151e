//! Terminal rendering for CLI results.

use btcyield_domain::entities::protocol::Protocol;
use btcyield_domain::value_objects::optimization_result::OptimizationResult;
use btcyield_domain::value_objects::simulation_result::SimulationDay;
use btcyield_simulation::monte_carlo::AggregateResult;
use prettytable::{Table, row};

pub fn print_optimization(amount: f64, result: &OptimizationResult) {
    println!("\n📊 Optimized Allocation (${amount:.2})");

    if result.allocation.is_empty() {
        println!("No protocol passed the allocation rules for this amount.");
    } else {
        let mut table = Table::new();
        table.set_titles(row!["Protocol", "Share %", "Amount $", "APY %", "Risk", "Liquidity"]);
        for entry in &result.allocation {
            table.add_row(row![
                entry.protocol,
                format!("{:.2}", entry.percentage),
                format!("{:.2}", entry.amount),
                format!("{:.1}", entry.apy),
                entry.risk,
                entry.liquidity
            ]);
        }
        table.printstd();
    }

    println!("════════════════════════════════════");
    println!("Expected APY:    {:.2}%", result.expected_apy);
    println!("Risk Score:      {:.2}", result.risk_score);
    println!("Diversification: {:.2}/10", result.diversification_score);
    println!("Confidence:      {}%", result.confidence);
    println!(
        "Projected Yield: ${:.2}/day  ${:.2}/week  ${:.2}/month  ${:.2}/year",
        result.projected_yield.daily,
        result.projected_yield.weekly,
        result.projected_yield.monthly,
        result.projected_yield.yearly
    );
    println!("Rebalance By:    {}", result.rebalance_date.format("%Y-%m-%d"));
    println!("════════════════════════════════════");
}

pub fn print_simulation(initial: f64, days: &[SimulationDay]) {
    let mut table = Table::new();
    table.set_titles(row!["Date", "Total Value $", "Change $"]);
    for day in days {
        table.add_row(row![
            day.date,
            format!("{:.2}", day.total_value),
            format!("{:+.2}", day.total_value - initial)
        ]);
    }
    table.printstd();

    if let Some(last) = days.last() {
        println!(
            "Final Value: ${:.2} ({:+.2}%)",
            last.total_value,
            (last.total_value / initial - 1.0) * 100.0
        );
    }
}

pub fn print_monte_carlo(initial: f64, result: &AggregateResult) {
    println!("\n🎲 Monte Carlo Results ({} iterations)", result.iterations);
    let mut table = Table::new();
    table.set_titles(row!["Statistic", "Final Value $", "vs Initial %"]);
    let pct = |value: f64| format!("{:+.2}", (value / initial - 1.0) * 100.0);
    for (label, value) in [
        ("Mean", result.mean_final_value),
        ("Median", result.median_final_value),
        ("VaR 95%", result.var_95_final_value),
        ("Min", result.min_final_value),
        ("Max", result.max_final_value),
    ] {
        table.add_row(row![label, format!("{value:.2}"), pct(value)]);
    }
    table.printstd();
}

pub fn print_protocols(protocols: &[Protocol]) {
    let mut table = Table::new();
    table.set_titles(row!["Protocol", "APY %", "Risk", "TVL $", "Liquidity"]);
    for protocol in protocols {
        table.add_row(row![
            protocol.name,
            format!("{:.1}", protocol.apy),
            protocol.risk_score,
            format!("{:.0}", protocol.tvl),
            protocol.liquidity
        ]);
    }
    table.printstd();
    println!("{} protocol(s)", protocols.len());
}
