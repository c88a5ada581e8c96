//! Spending aggregation
//!
//! Pure functions over an expense snapshot. Nothing here touches the
//! database: callers load expenses first and pass them in, so the same
//! snapshot always produces the same totals.
//!
//! Category policy: all six categories are always reported, with zero for
//! unspent ones. Time buckets are sparse (only periods with spending) and
//! ordered chronologically.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, DateRange, Expense, Granularity};

/// Total spent in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
    pub count: usize,
}

/// Spending per category, always covering every category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub total: Decimal,
    pub count: usize,
    pub categories: Vec<CategoryTotal>,
}

impl CategoryTotals {
    /// Amount spent in `category`
    pub fn amount(&self, category: Category) -> Decimal {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
            .unwrap_or_default()
    }
}

/// Total spent in one time bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketTotal {
    /// `YYYY-MM-DD`, `YYYY-Www` (ISO week) or `YYYY-MM`
    pub period: String,
    pub amount: Decimal,
    pub count: usize,
}

/// Category and time-bucket totals over the same snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub granularity: Granularity,
    pub range: DateRange,
    pub total: Decimal,
    pub count: usize,
    pub categories: Vec<CategoryTotal>,
    pub buckets: Vec<BucketTotal>,
}

/// Label of the bucket `date` falls into
pub fn bucket_label(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => date.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => {
            let week = date.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Granularity::Monthly => date.format("%Y-%m").to_string(),
    }
}

fn in_range<'a>(
    expenses: &'a [Expense],
    range: &'a DateRange,
) -> impl Iterator<Item = &'a Expense> + 'a {
    expenses.iter().filter(move |e| range.contains(e.date))
}

/// Sum spending per category
pub fn category_totals(expenses: &[Expense], range: &DateRange) -> CategoryTotals {
    let mut sums: BTreeMap<Category, (Decimal, usize)> = Category::ALL
        .iter()
        .map(|c| (*c, (Decimal::ZERO, 0)))
        .collect();

    let mut total = Decimal::ZERO;
    let mut count = 0;
    for expense in in_range(expenses, range) {
        let entry = sums.entry(expense.category).or_default();
        entry.0 += expense.amount;
        entry.1 += 1;
        total += expense.amount;
        count += 1;
    }

    let categories = Category::ALL
        .iter()
        .map(|c| {
            let (amount, count) = sums.get(c).copied().unwrap_or_default();
            CategoryTotal {
                category: *c,
                amount,
                count,
            }
        })
        .collect();

    CategoryTotals {
        total,
        count,
        categories,
    }
}

/// Sum spending per time bucket, oldest bucket first
pub fn bucket_totals(
    expenses: &[Expense],
    granularity: Granularity,
    range: &DateRange,
) -> Vec<BucketTotal> {
    // Labels sort chronologically as plain strings
    let mut sums: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();

    for expense in in_range(expenses, range) {
        let entry = sums
            .entry(bucket_label(expense.date, granularity))
            .or_default();
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(period, (amount, count))| BucketTotal {
            period,
            amount,
            count,
        })
        .collect()
}

/// Category totals and bucket totals in one pass over the same range
pub fn aggregate(expenses: &[Expense], granularity: Granularity, range: &DateRange) -> Aggregation {
    let categories = category_totals(expenses, range);
    let buckets = bucket_totals(expenses, granularity, range);

    Aggregation {
        granularity,
        range: *range,
        total: categories.total,
        count: categories.count,
        categories: categories.categories,
        buckets,
    }
}

/// Per-category monthly totals for the given `YYYY-MM` months, in the order
/// supplied. Months without spending in a category contribute zero.
pub fn monthly_category_series(
    expenses: &[Expense],
    months: &[String],
) -> BTreeMap<Category, Vec<Decimal>> {
    let index: BTreeMap<&str, usize> = months
        .iter()
        .enumerate()
        .map(|(i, m)| (m.as_str(), i))
        .collect();

    let mut series: BTreeMap<Category, Vec<Decimal>> = Category::ALL
        .iter()
        .map(|c| (*c, vec![Decimal::ZERO; months.len()]))
        .collect();

    for expense in expenses {
        let label = bucket_label(expense.date, Granularity::Monthly);
        if let Some(&i) = index.get(label.as_str()) {
            if let Some(values) = series.get_mut(&expense.category) {
                values[i] += expense.amount;
            }
        }
    }

    series
}
