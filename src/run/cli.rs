use anyhow::Result;

use crate::engine::BudgetError;
use crate::session::Session;
use crate::ui::screens::savings::goal_status;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], session: &mut Session) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(session),
        "expenses" | "ls" => cli_expenses(session),
        "add" => cli_add(&args[2..], session),
        "delete" | "rm" => cli_delete(&args[2..], session),
        "savings" => cli_savings(session),
        "rollover" => cli_rollover(session),
        "salary" => cli_setting(&args[2..], session, Setting::Salary),
        "goal" => cli_setting(&args[2..], session, Setting::SavingGoal),
        "reset" => cli_reset(&args[2..], session),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("daybudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("DayBudget — local-only salary and daily spending tracker");
    println!();
    println!("Usage: daybudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print this month's budget figures");
    println!("  expenses                      List this month's expenses");
    println!("  add <title> <amount>          Record an expense");
    println!("    --emergency, -e             Flag it as an emergency expense");
    println!("  delete <id>                   Delete an expense by id");
    println!("  savings                       Show saved total and monthly history");
    println!("  rollover                      Close the month and bank what is left");
    println!("  salary [amount]               Show or set the monthly salary");
    println!("  goal [amount]                 Show or set the monthly saving goal");
    println!("  reset --yes                   Delete all data (cannot be undone)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_summary(session: &Session) -> Result<()> {
    let engine = session.engine();
    let m = engine.metrics();

    println!("DayBudget: {} days left this month", engine.remaining_days());
    println!("{}", "─".repeat(44));
    println!("  Salary:              {}", format_setting(engine.salary()));
    println!("  Saving goal:         {}", format_setting(engine.saving_goal()));
    println!("  Available:           {}", format_amount(m.available_for_spending));
    println!("  Spent:               {}", format_amount(m.total_expenses));
    println!("    of which emergency {}", format_amount(m.emergency_expenses));
    println!("  Remaining:           {}", format_amount(m.remaining_salary));
    println!();
    println!("  Daily average:       {}", format_amount(m.daily_average));
    println!("  Daily limit:         {}", format_amount(m.daily_spending_limit));
    println!("  Adjusted limit:      {}", format_amount(m.adjusted_spending_limit));
    println!("  Actual per day:      {}", format_amount(m.actual_daily_spend));
    if m.is_over_daily_limit() {
        println!("  Over the daily limit by {}", format_amount(m.over_daily_limit));
    }
    if let Some((date, total)) = engine.highest_spend_day() {
        println!("  Highest spend day:   {date} ({})", format_amount(total));
    }
    if engine.goal_exceeds_salary() {
        println!();
        println!("Warning: the saving goal is larger than the salary");
    }
    Ok(())
}

fn cli_expenses(session: &Session) -> Result<()> {
    let expenses = session.engine().expenses();
    if expenses.is_empty() {
        println!("No expenses recorded yet");
        return Ok(());
    }

    println!("{:<15} {:<11} {:<28} {:>12}", "ID", "Date", "Title", "Amount");
    println!("{}", "─".repeat(69));
    for expense in expenses {
        let title = if expense.is_emergency {
            format!("{} [emergency]", expense.title)
        } else {
            expense.title.clone()
        };
        println!(
            "{:<15} {:<11} {:<28} {:>12}",
            expense.id,
            expense.date,
            title,
            format_amount(expense.amount),
        );
    }
    Ok(())
}

fn cli_add(args: &[String], session: &mut Session) -> Result<()> {
    let is_emergency = args.iter().any(|a| a == "--emergency" || a == "-e");
    let words: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| *a != "--emergency" && *a != "-e")
        .collect();

    let Some((amount, title_words)) = words.split_last() else {
        anyhow::bail!("Usage: daybudget add <title> <amount> [--emergency]");
    };
    let title = title_words.join(" ");

    let added = session.update(|engine| {
        engine
            .add_expense(&title, amount, is_emergency)
            .map(|list| list.last().cloned())
    })?;
    match added {
        Ok(Some(expense)) => {
            println!(
                "Added {} ({}){}",
                expense.title,
                format_amount(expense.amount),
                if expense.is_emergency { " as emergency" } else { "" }
            );
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => reject(e),
    }
}

fn cli_delete(args: &[String], session: &mut Session) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: daybudget delete <id>");
    };
    let id: i64 = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid expense id: {raw}"))?;

    let Some(title) = session.engine().find_expense(id).map(|e| e.title.clone()) else {
        anyhow::bail!("No expense with id {id}");
    };
    session.update(|engine| engine.delete_expense(id))?;
    println!("Deleted {title} ({id})");
    Ok(())
}

fn cli_savings(session: &Session) -> Result<()> {
    let engine = session.engine();
    println!("Total saved: {}", format_amount(engine.saved_amount()));

    let savings = engine.monthly_savings();
    if savings.is_empty() {
        return Ok(());
    }
    println!();
    println!("{:<12} {:<11} {:>12}  Goal", "Month", "Date", "Saved");
    println!("{}", "─".repeat(52));
    for saving in savings {
        let goal = goal_status(saving).unwrap_or_default();
        println!(
            "{:<12} {:<11} {:>12}  {goal}",
            saving.month,
            saving.date,
            format_amount(saving.amount),
        );
    }
    Ok(())
}

fn cli_rollover(session: &mut Session) -> Result<()> {
    match session.update(|engine| engine.roll_over())? {
        Some(rollover) => {
            println!(
                "Saved {} for {}{}",
                format_amount(rollover.record.amount),
                rollover.record.month,
                if rollover.record.goal_achieved {
                    " (goal achieved)"
                } else {
                    ""
                }
            );
            println!(
                "New month starts from {}",
                format_amount(rollover.opening_balance)
            );
        }
        None => println!("Nothing left to save this month"),
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Setting {
    Salary,
    SavingGoal,
}

fn cli_setting(args: &[String], session: &mut Session, setting: Setting) -> Result<()> {
    let label = match setting {
        Setting::Salary => "Salary",
        Setting::SavingGoal => "Saving goal",
    };

    let Some(raw) = args.first() else {
        let current = match setting {
            Setting::Salary => session.engine().salary(),
            Setting::SavingGoal => session.engine().saving_goal(),
        };
        println!("{label}: {}", format_setting(current));
        return Ok(());
    };

    let result = session.update(|engine| match setting {
        Setting::Salary => engine.set_salary(raw),
        Setting::SavingGoal => engine.set_saving_goal(raw),
    })?;
    if let Err(e) = result {
        return reject(e);
    }

    let value = match setting {
        Setting::Salary => session.engine().salary(),
        Setting::SavingGoal => session.engine().saving_goal(),
    };
    println!("{label} set to {}", format_setting(value));
    if session.engine().goal_exceeds_salary() {
        println!("Warning: the saving goal is larger than the salary");
    }
    Ok(())
}

fn cli_reset(args: &[String], session: &mut Session) -> Result<()> {
    if !args.iter().any(|a| a == "--yes" || a == "-y") {
        anyhow::bail!(
            "This deletes every expense, setting and savings record. Re-run with --yes to confirm"
        );
    }
    session.wipe(chrono::Local::now().date_naive())?;
    println!("All data deleted");
    Ok(())
}

fn format_setting(value: Option<rust_decimal::Decimal>) -> String {
    value.map(format_amount).unwrap_or_else(|| "not set".into())
}

/// Invalid input never changes anything; say why and exit non-zero.
fn reject(err: BudgetError) -> Result<()> {
    anyhow::bail!("{err}. Nothing was changed")
}
