//! Expense command implementations

use anyhow::{Context, Result};
use pennywise_core::db::Database;
use pennywise_core::models::{
    parse_date, Category, DateRange, Expense, ExpenseFilter, NewExpense, SortField, SortOrder,
};

use super::{today, truncate};

/// Build a list filter from raw CLI arguments
pub fn build_filter(
    category: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    search: Option<String>,
    sort: &str,
    order: &str,
) -> Result<ExpenseFilter> {
    let category = category
        .map(|c| c.parse::<Category>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;
    let from = from
        .map(parse_date)
        .transpose()
        .context("Invalid --from date")?;
    let to = to.map(parse_date).transpose().context("Invalid --to date")?;
    let sort: SortField = sort.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let order: SortOrder = order.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    Ok(ExpenseFilter {
        category,
        range: DateRange { from, to },
        search,
        sort,
        order,
    })
}

fn print_expense_row(expense: &Expense) {
    println!(
        "   {:>5} │ {} │ {:13} │ {:>10.2} │ {}",
        expense.id,
        expense.date,
        expense.category.as_str(),
        expense.amount,
        truncate(expense.note.as_deref().unwrap_or(""), 32)
    );
}

fn print_table_header() {
    println!(
        "   {:>5} │ {:10} │ {:13} │ {:>10} │ Note",
        "ID", "Date", "Category", "Amount"
    );
    println!("   ──────┼────────────┼───────────────┼────────────┼──────────────────");
}

/// Record an expense, returning its ID
pub fn cmd_add(
    db: &Database,
    amount: &str,
    category: &str,
    date: Option<&str>,
    note: Option<&str>,
) -> Result<i64> {
    let date = date
        .map(str::to_string)
        .unwrap_or_else(|| today().to_string());
    let expense =
        NewExpense::parse(amount, category, &date, note).context("Invalid expense")?;

    let id = db
        .insert_expense(&expense)
        .context("Failed to record expense")?;

    println!(
        "✅ Recorded expense #{}: {:.2} {} on {}",
        id, expense.amount, expense.category, expense.date
    );
    Ok(id)
}

/// Replace an expense, keeping current values for fields not given
pub fn cmd_edit(
    db: &Database,
    id: i64,
    amount: Option<&str>,
    category: Option<&str>,
    date: Option<&str>,
    note: Option<&str>,
) -> Result<()> {
    let current = db
        .get_expense(id)?
        .with_context(|| format!("Expense {} not found", id))?;

    let amount = amount
        .map(str::to_string)
        .unwrap_or_else(|| current.amount.to_string());
    let category = category.unwrap_or(current.category.as_str());
    let date = date
        .map(str::to_string)
        .unwrap_or_else(|| current.date.to_string());
    let note = note.or(current.note.as_deref());

    let expense = NewExpense::parse(&amount, category, &date, note).context("Invalid expense")?;

    if !db.update_expense(id, &expense)? {
        anyhow::bail!("Expense {} not found", id);
    }

    println!("✅ Updated expense #{}", id);
    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    if !db.delete_expense(id)? {
        anyhow::bail!("Expense {} not found", id);
    }

    println!("🗑️  Deleted expense #{}", id);
    Ok(())
}

pub fn cmd_show(db: &Database, id: i64) -> Result<()> {
    let expense = db
        .get_expense(id)?
        .with_context(|| format!("Expense {} not found", id))?;

    println!();
    println!("🧾 Expense #{}", expense.id);
    println!("   ─────────────────────────────");
    println!("   Amount:   {:.2}", expense.amount);
    println!("   Category: {}", expense.category);
    println!("   Date:     {}", expense.date);
    if let Some(note) = &expense.note {
        println!("   Note:     {}", note);
    }
    println!(
        "   Recorded: {}",
        expense.created_at.format("%Y-%m-%d %H:%M")
    );

    Ok(())
}

pub fn cmd_list(db: &Database, filter: &ExpenseFilter, limit: usize) -> Result<()> {
    let expenses = db.list_expenses(filter)?;

    if expenses.is_empty() {
        println!("No expenses found. Record one with: pennywise add <amount> --category <name>");
        return Ok(());
    }

    let total: rust_decimal::Decimal = expenses.iter().map(|e| e.amount).sum();

    println!();
    println!("💸 Expenses ({} found, total {:.2})", expenses.len(), total);
    print_table_header();

    for expense in expenses.iter().take(limit) {
        print_expense_row(expense);
    }

    if expenses.len() > limit {
        println!("   ... and {} more (use --limit)", expenses.len() - limit);
    }

    Ok(())
}

/// Print a short list of expenses (used by the dashboard)
pub(crate) fn print_expenses(expenses: &[Expense]) {
    print_table_header();
    for expense in expenses {
        print_expense_row(expense);
    }
}
