//! Domain models for Pennywise

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used for storage, query parameters and CLI input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidData(format!("Invalid date '{}' (use YYYY-MM-DD)", s)))
}

/// Largest amount accepted for an expense or a budget figure
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Reject money values that are out of range or finer than a cent
fn check_money(value: Decimal, field: &str) -> Result<()> {
    if value > MAX_AMOUNT {
        return Err(Error::InvalidData(format!(
            "{} cannot exceed {} (got {})",
            field, MAX_AMOUNT, value
        )));
    }
    if value.normalize().scale() > 2 {
        return Err(Error::InvalidData(format!(
            "{} cannot have more than 2 decimal places (got {})",
            field, value
        )));
    }
    Ok(())
}

/// Parse a decimal amount such as `12.50`
pub fn parse_amount(s: &str) -> Result<Decimal> {
    Decimal::from_str(s.trim())
        .map_err(|_| Error::InvalidData(format!("Invalid amount '{}'", s)))
}

// ========== Categories ==========

/// Fixed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Rent,
    Travel,
    Entertainment,
    Bills,
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 6] = [
        Self::Food,
        Self::Rent,
        Self::Travel,
        Self::Entertainment,
        Self::Bills,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Rent => "Rent",
            Self::Travel => "Travel",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "rent" => Ok(Self::Rent),
            "travel" => Ok(Self::Travel),
            "entertainment" => Ok(Self::Entertainment),
            "bills" => Ok(Self::Bills),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "Unknown category: {} (valid: Food, Rent, Travel, Entertainment, Bills, Other)",
                s
            )),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== Expenses ==========

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Always positive
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated expense ready to be written (create or full replace)
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl NewExpense {
    /// Build a new expense, rejecting non-positive, oversized or sub-cent
    /// amounts. Blank notes are dropped.
    pub fn new(
        amount: Decimal,
        category: Category,
        date: NaiveDate,
        note: Option<String>,
    ) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "Amount must be greater than zero (got {})",
                amount
            )));
        }
        check_money(amount, "Amount")?;

        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            amount,
            category,
            date,
            note,
        })
    }

    /// Parse and validate raw text fields (CLI arguments, form values)
    pub fn parse(amount: &str, category: &str, date: &str, note: Option<&str>) -> Result<Self> {
        let amount = parse_amount(amount)?;
        let category: Category = category.parse().map_err(Error::InvalidData)?;
        let date = parse_date(date)?;
        Self::new(amount, category, date, note.map(str::to_string))
    }
}

// ========== Budget ==========

/// The single budget settings record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetSettings {
    pub monthly_income: Decimal,
    pub savings_goal: Decimal,
}

impl BudgetSettings {
    pub fn new(monthly_income: Decimal, savings_goal: Decimal) -> Result<Self> {
        if monthly_income < Decimal::ZERO {
            return Err(Error::InvalidData(
                "Monthly income cannot be negative".to_string(),
            ));
        }
        if savings_goal < Decimal::ZERO {
            return Err(Error::InvalidData(
                "Savings goal cannot be negative".to_string(),
            ));
        }
        check_money(monthly_income, "Monthly income")?;
        check_money(savings_goal, "Savings goal")?;
        Ok(Self {
            monthly_income,
            savings_goal,
        })
    }
}

// ========== Queries ==========

/// Time bucket size for trend aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => Err(format!(
                "Unknown granularity: {} (valid: daily, weekly, monthly)",
                s
            )),
        }
    }
}

/// Inclusive date range; either bound may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Unbounded range
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = crate::forecast::next_month(date)
            .pred_opt()
            .unwrap_or(date);
        Self::between(first, last)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Sort column for expense listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Category,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            _ => Err(format!(
                "Unknown sort field: {} (valid: date, amount, category)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Unknown sort order: {} (valid: asc, desc)", s)),
        }
    }
}

/// Filters for the expense list
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    pub range: DateRange,
    /// Case-insensitive substring match on note or category
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl ExpenseFilter {
    /// Whether `expense` passes the category, date and search filters.
    /// Search is ASCII case-insensitive, like SQLite's `LIKE`.
    pub fn matches(&self, expense: &Expense) -> bool {
        if self.category.is_some_and(|c| c != expense.category) {
            return false;
        }
        if !self.range.contains(expense.date) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let needle = q.to_ascii_lowercase();
                let in_note = expense
                    .note
                    .as_deref()
                    .is_some_and(|n| n.to_ascii_lowercase().contains(&needle));
                in_note || expense.category.as_str().to_ascii_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    /// Filter and sort a snapshot in the same order as `Database::list_expenses`
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let mut listed: Vec<Expense> = expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();

        listed.sort_by(|a, b| {
            let by_field = match self.sort {
                SortField::Date => a.date.cmp(&b.date),
                SortField::Amount => a.amount.cmp(&b.amount),
                SortField::Category => a.category.as_str().cmp(b.category.as_str()),
            };
            let ordering = by_field.then(a.id.cmp(&b.id));
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        listed
    }
}
