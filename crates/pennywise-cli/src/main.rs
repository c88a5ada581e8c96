//! Pennywise CLI - Personal expense tracker
//!
//! Usage:
//!   pennywise init                          Initialize database
//!   pennywise add 12.50 --category Food     Record an expense
//!   pennywise report forecast               Forecast next month
//!   pennywise serve --port 3000             Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
            forecast_window,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
                forecast_window,
            )
            .await
        }
        Commands::Add {
            amount,
            category,
            date,
            note,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_add(&db, &amount, &category, date.as_deref(), note.as_deref())
                .map(|_| ())
        }
        Commands::Edit {
            id,
            amount,
            category,
            date,
            note,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_edit(
                &db,
                id,
                amount.as_deref(),
                category.as_deref(),
                date.as_deref(),
                note.as_deref(),
            )
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Show { id } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_show(&db, id)
        }
        Commands::List {
            category,
            from,
            to,
            search,
            sort,
            order,
            limit,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let filter = commands::build_filter(
                category.as_deref(),
                from.as_deref(),
                to.as_deref(),
                search,
                &sort,
                &order,
            )?;
            commands::cmd_list(&db, &filter, limit)
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_budget_show(&db),
                Some(BudgetAction::Set { income, goal }) => {
                    commands::cmd_budget_set(&db, &income, &goal)
                }
            }
        }
        Commands::Report { report } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let today = commands::today();
            match report {
                ReportType::Categories { period, from, to } => {
                    let range =
                        commands::resolve_period(&period, from.as_deref(), to.as_deref(), today)?;
                    commands::cmd_report_categories(&db, &range)
                }
                ReportType::Trends {
                    granularity,
                    period,
                    from,
                    to,
                } => {
                    let range =
                        commands::resolve_period(&period, from.as_deref(), to.as_deref(), today)?;
                    let granularity: pennywise_core::models::Granularity = granularity
                        .parse()
                        .map_err(|e: String| anyhow::anyhow!(e))?;
                    commands::cmd_report_trends(&db, &range, granularity)
                }
                ReportType::Forecast {
                    window,
                    by_category,
                } => commands::cmd_report_forecast(&db, today, window, by_category),
                ReportType::Trend { window } => commands::cmd_report_trend(&db, today, window),
            }
        }
        Commands::Dashboard { window } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_dashboard(&db, commands::today(), window)
        }
        Commands::Export {
            month,
            format,
            output,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_export(
                &db,
                month.as_deref(),
                &format,
                output.as_deref(),
                commands::today(),
            )
            .map(|_| ())
        }
    }
}
