use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::LedgerService;
use crate::domain::{format_cents, Category, Trend};
use crate::storage::DEFAULT_DATA_FILE;

/// Spendlog - flat-file expense tracker
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "A local-first expense tracker backed by a plain CSV ledger")]
#[command(version)]
pub struct Cli {
    /// Data file path
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    pub file: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new expense
    Add {
        /// Category (e.g., "Groceries", "Rent"); see `spendlog categories`
        category: String,

        /// Amount to record (e.g., "12.50" or "12")
        amount: String,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Update an existing expense (resets its date to today)
    Update {
        /// Expense ID
        id: u32,

        /// New category
        category: String,

        /// New amount
        amount: String,

        /// New note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: u32,
    },

    /// List all recorded expenses
    List,

    /// List the valid expense categories
    Categories,

    /// Generate reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Check this month's spending against the monthly budget
    Budget,

    /// Export data to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short = 'F', long, default_value = "csv")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending totals per category
    Category {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Spending totals per month with month-over-month trend
    Monthly {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut service = LedgerService::open(&self.file);

        if self.verbose {
            if service.list_expenses().is_empty() && !service.data_path().exists() {
                eprintln!("No existing data found. Starting fresh.");
            } else {
                eprintln!(
                    "Loaded {} expense(s) from {}",
                    service.list_expenses().len(),
                    service.data_path().display()
                );
            }
        }

        match self.command {
            Commands::Add {
                category,
                amount,
                note,
                date,
            } => {
                let expense = service.add_expense(&category, &amount, &note, date.as_deref())?;
                println!(
                    "Added expense #{}: {} {} on {}",
                    expense.id,
                    expense.category,
                    format_cents(expense.amount_cents),
                    expense.date.format("%Y-%m-%d")
                );
            }

            Commands::Update {
                id,
                category,
                amount,
                note,
            } => match service.update_expense(id, &category, &amount, &note)? {
                Some(expense) => {
                    println!(
                        "Updated expense #{}: {} {} on {}",
                        expense.id,
                        expense.category,
                        format_cents(expense.amount_cents),
                        expense.date.format("%Y-%m-%d")
                    );
                }
                None => println!("Expense {} not found.", id),
            },

            Commands::Delete { id } => {
                let removed = service.delete_expense(id)?;
                if removed {
                    println!("Deleted expense {}.", id);
                } else {
                    println!("Expense {} not found.", id);
                }
            }

            Commands::List => run_list_command(&service),

            Commands::Categories => {
                for category in Category::ALL {
                    println!("{}", category);
                }
            }

            Commands::Report(report_cmd) => run_report_command(&service, report_cmd)?,

            Commands::Budget => run_budget_command(&service),

            Commands::Export { output, format } => {
                run_export_command(&service, output.as_deref(), &format)?;
            }
        }

        Ok(())
    }
}

fn run_list_command(service: &LedgerService) {
    let expenses = service.list_expenses();
    if expenses.is_empty() {
        println!("No expenses recorded.");
        return;
    }

    println!(
        "{:<6} {:<15} {:>12} {:<12} {}",
        "ID", "CATEGORY", "AMOUNT", "DATE", "NOTE"
    );
    println!("{}", "-".repeat(70));
    for expense in expenses {
        println!(
            "{:<6} {:<15} {:>12} {:<12} {}",
            expense.id,
            expense.category,
            format_cents(expense.amount_cents),
            expense.date.format("%Y-%m-%d"),
            truncate(&expense.note, 30)
        );
    }
}

fn run_report_command(service: &LedgerService, cmd: ReportCommands) -> Result<()> {
    match cmd {
        ReportCommands::Category { format } => {
            let report = service.category_report();

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                "csv" => {
                    println!("category,total");
                    for cat in &report.categories {
                        println!("{},{}", cat.category, cat.total);
                    }
                }
                _ => {
                    if report.categories.is_empty() {
                        println!("No expenses recorded.");
                        return Ok(());
                    }

                    println!("Category Report");
                    println!();
                    println!("{:<15} {:>12} {:>7}", "CATEGORY", "TOTAL", "SHARE");
                    println!("{}", "-".repeat(36));
                    for cat in &report.categories {
                        println!(
                            "{:<15} {:>12} {:>6.1}%",
                            cat.category,
                            format_cents(cat.total),
                            cat.percentage
                        );
                    }
                    println!("{}", "-".repeat(36));
                    println!("{:<15} {:>12}", "Total", format_cents(report.total));
                }
            }
        }

        ReportCommands::Monthly { format } => {
            let report = service.monthly_report();

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                "csv" => {
                    println!("month,total,prior_total");
                    for month in &report.months {
                        println!("{},{},{}", month.month, month.total, month.prior_total);
                    }
                }
                _ => {
                    if report.months.is_empty() {
                        println!("No expenses recorded.");
                        return Ok(());
                    }

                    println!("Monthly Report");
                    println!();
                    for month in &report.months {
                        println!("{}: {}", month.month, format_cents(month.total));
                        match month.trend {
                            Trend::Increased => {
                                println!("  Spending increased compared to last month.");
                            }
                            Trend::Decreased => {
                                println!("  Spending reduced compared to last month.");
                            }
                            // No message when unchanged.
                            Trend::Unchanged => {}
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn run_budget_command(service: &LedgerService) {
    let status = service.budget_status();
    println!(
        "This month's total spending: {}",
        format_cents(status.report.spent)
    );
    if status.exceeded {
        println!(
            "Budget exceeded! Limit: {}",
            format_cents(status.report.limit)
        );
    } else {
        println!(
            "Within budget ({} remaining).",
            format_cents(status.report.remaining())
        );
    }
}

fn run_export_command(service: &LedgerService, output: Option<&str>, format: &str) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match format {
        "csv" => {
            let count = exporter.export_expenses_csv(writer)?;
            if let Some(path) = output {
                println!("Exported {} expense(s) to {}", count, path);
            }
        }
        "json" => {
            let snapshot = exporter.export_snapshot_json(writer)?;
            if let Some(path) = output {
                println!("Exported {} expense(s) to {}", snapshot.expenses.len(), path);
            }
        }
        other => {
            anyhow::bail!("Unknown export format '{}'. Valid formats: csv, json", other);
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
