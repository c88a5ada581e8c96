//! Budget command implementations

use anyhow::{Context, Result};
use pennywise_core::db::Database;
use pennywise_core::models::{parse_amount, BudgetSettings};

pub fn cmd_budget_show(db: &Database) -> Result<()> {
    let budget = db.get_budget()?;

    println!();
    println!("💰 Budget Settings");
    println!("   ─────────────────────────────");
    println!("   Monthly income: {:>10.2}", budget.monthly_income);
    println!("   Savings goal:   {:>10.2}", budget.savings_goal);
    println!(
        "   Spendable:      {:>10.2}",
        budget.monthly_income - budget.savings_goal
    );

    Ok(())
}

pub fn cmd_budget_set(db: &Database, income: &str, goal: &str) -> Result<()> {
    let budget = BudgetSettings::new(
        parse_amount(income).context("Invalid --income")?,
        parse_amount(goal).context("Invalid --goal")?,
    )
    .context("Invalid budget")?;

    db.set_budget(&budget)
        .context("Failed to save budget settings")?;

    println!(
        "✅ Budget updated: income {:.2}, savings goal {:.2}",
        budget.monthly_income, budget.savings_goal
    );
    Ok(())
}
