use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen, SettingField};
use super::util::format_amount;
use crate::session::Session;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit DayBudget", cmd_quit, r);
    register_command!("quit", "Quit DayBudget", cmd_quit, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("r", "Go to Reports", cmd_reports, r);
    register_command!("reports", "Go to Reports", cmd_reports, r);
    register_command!("s", "Go to Savings", cmd_savings, r);
    register_command!("savings", "Go to Savings", cmd_savings, r);
    register_command!("settings", "Go to Settings", cmd_settings, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add Groceries 42.50)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :add Groceries 42.50)",
        cmd_add,
        r
    );
    register_command!(
        "emergency",
        "Add emergency expense (e.g. :emergency Car repair 400)",
        cmd_emergency,
        r
    );
    register_command!(
        "em",
        "Add emergency expense (e.g. :emergency Car repair 400)",
        cmd_emergency,
        r
    );
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!(
        "salary",
        "Set monthly salary (e.g. :salary 3000, empty clears)",
        cmd_salary,
        r
    );
    register_command!(
        "goal",
        "Set monthly saving goal (e.g. :goal 500, empty clears)",
        cmd_goal,
        r
    );
    register_command!(
        "rollover",
        "Save what is left and start a new month",
        cmd_rollover,
        r
    );
    register_command!("days", "Recount days left in the month", cmd_days, r);
    register_command!("reset", "Delete all data", cmd_reset, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, session)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

/// One help row per command: every name sharing a description, longest first,
/// sorted by that name.
pub(crate) fn help_entries() -> Vec<(String, &'static str)> {
    let mut grouped: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
    for (&name, cmd) in COMMANDS.iter() {
        grouped.entry(cmd.description).or_default().push(name);
    }

    let mut entries: Vec<(String, &'static str)> = grouped
        .into_iter()
        .map(|(description, mut names)| {
            names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
            let label = names
                .iter()
                .map(|n| format!(":{n}"))
                .collect::<Vec<_>>()
                .join(" ");
            (label, description)
        })
        .collect();
    entries.sort();
    entries
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `"Car repair 400"` into `("Car repair", "400")`. The amount is the last word.
pub(crate) fn split_title_amount(args: &str) -> Option<(&str, &str)> {
    let (title, amount) = args.trim().rsplit_once(' ')?;
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some((title, amount))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_reports(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Reports;
    Ok(())
}

fn cmd_savings(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Savings;
    Ok(())
}

fn cmd_settings(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Settings;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    add_expense(args, false, app, session)
}

fn cmd_emergency(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    add_expense(args, true, app, session)
}

fn add_expense(
    args: &str,
    is_emergency: bool,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    let Some((title, amount)) = split_title_amount(args) else {
        let name = if is_emergency { "emergency" } else { "add" };
        app.set_status(format!("Usage: :{name} <title> <amount>"));
        return Ok(());
    };

    let result = session.update(|engine| {
        engine
            .add_expense(title, amount, is_emergency)
            .map(|list| list.len())
    })?;
    match result {
        Ok(count) => {
            app.refresh_all(session);
            app.screen = Screen::Expenses;
            app.expense_index = count.saturating_sub(1);
            app.expense_scroll = app.expense_index.saturating_sub(app.expense_page() - 1);
            app.set_status(format!(
                "Added {}{title}: {}",
                if is_emergency { "emergency expense " } else { "" },
                app.expenses
                    .last()
                    .map(|e| format_amount(e.amount))
                    .unwrap_or_default()
            ));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if let Some(expense) = app.selected_expense() {
        let (id, title) = (expense.id, expense.title.clone());
        app.request_confirm(
            PendingAction::DeleteExpense {
                id,
                title: title.clone(),
            },
            format!("Delete '{title}'?"),
        );
    }
    Ok(())
}

fn cmd_salary(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    apply_setting(SettingField::Salary, args, app, session)
}

fn cmd_goal(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    apply_setting(SettingField::SavingGoal, args, app, session)
}

/// Commit a raw value for `field` through the engine. Shared by the
/// `:salary`/`:goal` commands and the Settings edit line.
pub(crate) fn apply_setting(
    field: SettingField,
    raw: &str,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    let result = session.update(|engine| match field {
        SettingField::Salary => engine.set_salary(raw),
        SettingField::SavingGoal => engine.set_saving_goal(raw),
    })?;
    if let Err(e) = result {
        app.set_status(e.to_string());
        return Ok(());
    }

    app.refresh_all(session);
    let shown = app
        .setting_value(field)
        .map(format_amount)
        .unwrap_or_else(|| "not set".into());
    if app.goal_exceeds_salary {
        app.set_status(format!(
            "{field}: {shown}. Warning: saving goal is larger than the salary"
        ));
    } else {
        app.set_status(format!("{field}: {shown}"));
    }
    Ok(())
}

fn cmd_rollover(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    if app.metrics.remaining_salary <= rust_decimal::Decimal::ZERO {
        app.set_status("Nothing left to save this month");
        return Ok(());
    }
    let message = format!(
        "Save {} and start a new month? Expenses will be cleared",
        format_amount(app.metrics.remaining_salary)
    );
    app.request_confirm(PendingAction::Rollover, message);
    Ok(())
}

fn cmd_days(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    app.today = chrono::Local::now().date_naive();
    let days = session.refresh_remaining_days(app.today);
    app.refresh_all(session);
    app.set_status(format!("{days} days left this month"));
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.request_confirm(
        PendingAction::ResetAll,
        "Delete ALL expenses, savings and settings? This cannot be undone",
    );
    Ok(())
}

/// Carry out a confirmed action.
pub(crate) fn run_pending(
    action: PendingAction,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    match action {
        PendingAction::DeleteExpense { id, title } => {
            if session.update(|engine| engine.delete_expense(id))? {
                app.set_status(format!("Deleted: {title}"));
            } else {
                app.set_status(format!("'{title}' was already gone"));
            }
        }
        PendingAction::Rollover => match session.update(|engine| engine.roll_over())? {
            Some(rollover) => {
                let achieved = if rollover.record.goal_achieved {
                    " Goal achieved ✓"
                } else {
                    ""
                };
                app.set_status(format!(
                    "Saved {} for {}.{achieved}",
                    format_amount(rollover.record.amount),
                    rollover.record.month
                ));
                app.screen = Screen::Savings;
            }
            None => app.set_status("Nothing left to save this month"),
        },
        PendingAction::ResetAll => {
            session.wipe(app.today)?;
            app.expense_index = 0;
            app.expense_scroll = 0;
            app.savings_index = 0;
            app.savings_scroll = 0;
            app.set_status("All data deleted");
        }
    }
    app.refresh_all(session);
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    Ok(())
}
