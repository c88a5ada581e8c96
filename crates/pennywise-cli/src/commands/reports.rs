//! Report command implementations

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Months, NaiveDate};
use pennywise_core::aggregate;
use pennywise_core::db::Database;
use pennywise_core::forecast::{month_start, Forecast, ForecastStatus, Forecaster};
use pennywise_core::models::{parse_date, DateRange, ExpenseFilter, Granularity};
use pennywise_core::report::TREND_MONTHS;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::print_expenses;

/// Resolve a period preset (or explicit --from/--to) to an inclusive range
pub fn resolve_period(
    period: &str,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange> {
    // Custom dates override the preset
    if custom_from.is_some() || custom_to.is_some() {
        let from = custom_from
            .map(parse_date)
            .transpose()
            .context("Invalid --from date format (use YYYY-MM-DD)")?;
        let to = custom_to
            .map(parse_date)
            .transpose()
            .context("Invalid --to date format (use YYYY-MM-DD)")?;
        return Ok(DateRange { from, to });
    }

    let this_month = month_start(today);

    let range = match period.to_lowercase().as_str() {
        "this-month" => DateRange::between(this_month, today),
        "last-month" => {
            let start = this_month
                .checked_sub_months(Months::new(1))
                .context("Date out of range")?;
            DateRange::month_of(start)
        }
        "this-year" => {
            let start = this_month.with_month(1).context("Date out of range")?;
            DateRange::between(start, today)
        }
        "last-30-days" => DateRange::between(today - Duration::days(30), today),
        "last-90-days" => DateRange::between(today - Duration::days(90), today),
        "last-12-months" => {
            let start = this_month
                .checked_sub_months(Months::new(11))
                .context("Date out of range")?;
            DateRange::between(start, today)
        }
        "all" => DateRange::all(),
        _ => anyhow::bail!("Unknown period: {}. Available: this-month, last-month, this-year, last-30-days, last-90-days, last-12-months, all", period),
    };

    Ok(range)
}

fn describe_range(range: &DateRange) -> String {
    match (range.from, range.to) {
        (Some(from), Some(to)) => format!("{} to {}", from, to),
        (Some(from), None) => format!("from {}", from),
        (None, Some(to)) => format!("through {}", to),
        (None, None) => "all time".to_string(),
    }
}

fn describe_forecast(forecast: &Forecast) -> String {
    match (forecast.status, forecast.amount) {
        (ForecastStatus::NoData, _) | (_, None) => "no spending history yet".to_string(),
        (ForecastStatus::Complete, Some(amount)) => {
            format!("{:.2} (average of {} months)", amount, forecast.periods_used)
        }
        (ForecastStatus::InsufficientHistory, Some(amount)) => format!(
            "{:.2} (only {} of {} months of history)",
            amount, forecast.periods_used, forecast.window
        ),
    }
}

fn forecaster(window: usize) -> Result<Forecaster> {
    Forecaster::new(window).context("Invalid --window")
}

pub fn cmd_report_categories(db: &Database, range: &DateRange) -> Result<()> {
    let expenses = db.expenses_in_range(range)?;
    let totals = aggregate::category_totals(&expenses, range);

    println!();
    println!("📊 Spending by Category");
    println!("   Period: {}", describe_range(range));
    println!("   ─────────────────────────────────────────────");

    if totals.count == 0 {
        println!("   No spending found in this period.");
        return Ok(());
    }

    println!("   Total: {:.2}", totals.total);
    println!();
    println!(
        "   {:15} │ {:>10} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ────────────────┼────────────┼────────┼───────");

    for cat in &totals.categories {
        let pct = if totals.total.is_zero() {
            Decimal::ZERO
        } else {
            (cat.amount * Decimal::ONE_HUNDRED / totals.total).round_dp(1)
        };
        println!(
            "   {:15} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            cat.category.as_str(),
            cat.amount,
            pct,
            cat.count
        );
    }

    Ok(())
}

pub fn cmd_report_trends(db: &Database, range: &DateRange, granularity: Granularity) -> Result<()> {
    let aggregation = db.spending_aggregation(granularity, range)?;

    println!();
    println!("📈 Spending Trends ({})", granularity.as_str());
    println!("   Period: {}", describe_range(range));
    println!("   ─────────────────────────────────────────────");

    if aggregation.buckets.is_empty() {
        println!("   No spending found in this period.");
        return Ok(());
    }

    let max = aggregation
        .buckets
        .iter()
        .map(|b| b.amount)
        .max()
        .unwrap_or_default();

    for bucket in &aggregation.buckets {
        let width = if max.is_zero() {
            0
        } else {
            (bucket.amount * Decimal::from(30) / max)
                .round()
                .to_usize()
                .unwrap_or(0)
        };
        println!(
            "   {:10} │ {:>10.2} │ {}",
            bucket.period,
            bucket.amount,
            "█".repeat(width)
        );
    }

    println!("   Total: {:.2}", aggregation.total);
    Ok(())
}

pub fn cmd_report_forecast(
    db: &Database,
    today: NaiveDate,
    window: usize,
    by_category: bool,
) -> Result<()> {
    let next = db.next_month_forecast(today, &forecaster(window)?, by_category)?;

    println!();
    println!("🔮 Forecast for {}", next.month);
    println!("   ─────────────────────────────────────────────");

    for month in &next.history {
        println!("   {:10} │ {:>10.2}", month.period, month.amount);
    }
    if !next.history.is_empty() {
        println!("   ───────────┼────────────");
    }
    println!("   Projected: {}", describe_forecast(&next.forecast));

    if let Some(categories) = &next.by_category {
        println!();
        for (category, forecast) in categories {
            if let Some(amount) = forecast.amount.filter(|a| !a.is_zero()) {
                println!("   {:15} │ {:>10.2}", category.as_str(), amount);
            }
        }
    }

    Ok(())
}

pub fn cmd_report_trend(db: &Database, today: NaiveDate, window: usize) -> Result<()> {
    let trend = db.monthly_trend(today, &forecaster(window)?, TREND_MONTHS)?;

    println!();
    println!("📅 Monthly Trend (last {} months)", TREND_MONTHS);
    println!("   ─────────────────────────────────────────────");

    if trend.actual.is_empty() {
        println!("   No spending in the last {} months.", TREND_MONTHS);
    }
    for month in &trend.actual {
        println!("   {:10} │ {:>10.2}", month.period, month.amount);
    }
    match trend.forecast.amount {
        Some(amount) => println!("   {:10} │ {:>10.2}  (forecast)", trend.forecast_month, amount),
        None => println!("   {:10} │ {:>10}  (no forecast)", trend.forecast_month, "-"),
    }

    Ok(())
}

pub fn cmd_dashboard(db: &Database, today: NaiveDate, window: usize) -> Result<()> {
    let dashboard = db.dashboard(&ExpenseFilter::default(), today, &forecaster(window)?)?;
    let budget = &dashboard.budget;

    println!();
    println!("📊 Pennywise Dashboard ({})", budget.month);
    println!("   ─────────────────────────────────────────────");
    println!("   Spent this month:   {:>10.2}", budget.spent_this_month);
    println!("   Monthly income:     {:>10.2}", budget.monthly_income);
    println!("   Remaining:          {:>10.2}", budget.remaining);
    println!(
        "   Spendable (after savings goal {:.2}): {:.2}",
        budget.savings_goal, budget.spendable
    );
    println!(
        "   Next month:         {}",
        describe_forecast(&dashboard.forecast.forecast)
    );
    if let Some(savings) = budget.projected_savings {
        println!("   Projected savings:  {:>10.2}", savings);
    }

    if budget.on_track {
        println!("   ✅ On track for your savings goal");
    } else {
        println!("   ⚠️  Spending is past what the savings goal allows");
    }

    println!();
    println!("   By category (all time, total {:.2})", dashboard.categories.total);
    for cat in dashboard.categories.categories.iter().filter(|c| c.count > 0) {
        println!("   {:15} │ {:>10.2}", cat.category.as_str(), cat.amount);
    }

    if !dashboard.top_expenses.is_empty() {
        println!();
        println!("   Largest expenses");
        print_expenses(&dashboard.top_expenses);
    }

    let last_30: Decimal = dashboard.daily.iter().map(|d| d.amount).sum();
    println!();
    println!(
        "   Last 30 days: {:.2} across {} day(s) with spending",
        last_30,
        dashboard.daily.len()
    );
    if !dashboard.expenses.is_empty() {
        println!();
        println!("   Recent expenses");
        print_expenses(&dashboard.expenses[..dashboard.expenses.len().min(5)]);
    }

    Ok(())
}
