use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::engine::Metrics;
use crate::models::{Expense, SavingsRecord};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Expenses,
    Reports,
    Savings,
    Settings,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Expenses, Self::Reports, Self::Savings, Self::Settings]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expenses => write!(f, "Expenses"),
            Self::Reports => write!(f, "Reports"),
            Self::Savings => write!(f, "Savings"),
            Self::Settings => write!(f, "Settings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, title: String },
    Rollover,
    ResetAll,
}

/// The two budget settings editable from the Settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingField {
    Salary,
    SavingGoal,
}

impl SettingField {
    pub(crate) fn all() -> &'static [SettingField] {
        &[Self::Salary, Self::SavingGoal]
    }
}

impl std::fmt::Display for SettingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Salary => write!(f, "Monthly salary"),
            Self::SavingGoal => write!(f, "Monthly saving goal"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,

    // Mirrors of engine state, rebuilt by `refresh_all`
    pub(crate) salary: Option<Decimal>,
    pub(crate) saving_goal: Option<Decimal>,
    pub(crate) remaining_days: i64,
    pub(crate) metrics: Metrics,
    pub(crate) highest_spend_day: Option<(String, Decimal)>,
    pub(crate) goal_fits_salary: bool,
    pub(crate) goal_exceeds_salary: bool,

    // Expenses
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Savings
    pub(crate) saved_amount: Decimal,
    pub(crate) monthly_savings: Vec<SavingsRecord>,
    pub(crate) savings_index: usize,
    pub(crate) savings_scroll: usize,

    // Settings
    pub(crate) setting_index: usize,
    pub(crate) editing_field: Option<SettingField>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Expenses,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today,

            salary: None,
            saving_goal: None,
            remaining_days: 0,
            metrics: Metrics::default(),
            highest_spend_day: None,
            goal_fits_salary: false,
            goal_exceeds_salary: false,

            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,

            saved_amount: Decimal::ZERO,
            monthly_savings: Vec::new(),
            savings_index: 0,
            savings_scroll: 0,

            setting_index: 0,
            editing_field: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Pull every displayed value from the engine. Metrics are never cached
    /// across mutations; this runs after each one.
    pub(crate) fn refresh_all(&mut self, session: &Session) {
        let engine = session.engine();

        self.salary = engine.salary();
        self.saving_goal = engine.saving_goal();
        self.remaining_days = engine.remaining_days();
        self.metrics = engine.metrics();
        self.highest_spend_day = engine.highest_spend_day();
        self.goal_fits_salary = engine.goal_fits_salary();
        self.goal_exceeds_salary = engine.goal_exceeds_salary();

        self.expenses = engine.expenses().to_vec();
        self.saved_amount = engine.saved_amount();
        self.monthly_savings = engine.monthly_savings().to_vec();

        crate::ui::util::clamp_index(
            &mut self.expense_index,
            &mut self.expense_scroll,
            self.expenses.len(),
        );
        crate::ui::util::clamp_index(
            &mut self.savings_index,
            &mut self.savings_scroll,
            self.monthly_savings.len(),
        );
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn selected_setting(&self) -> SettingField {
        SettingField::all()
            .get(self.setting_index)
            .copied()
            .unwrap_or(SettingField::Salary)
    }

    pub(crate) fn setting_value(&self, field: SettingField) -> Option<Decimal> {
        match field {
            SettingField::Salary => self.salary,
            SettingField::SavingGoal => self.saving_goal,
        }
    }

    /// Open the edit line for `field`, prefilled with its current value.
    pub(crate) fn begin_edit(&mut self, field: SettingField) {
        self.command_input = self
            .setting_value(field)
            .map(|v| v.to_string())
            .unwrap_or_default();
        self.editing_field = Some(field);
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn finish_edit(&mut self) {
        self.command_input.clear();
        self.editing_field = None;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn request_confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.confirm_message = message.into();
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn has_emergency(&self) -> bool {
        self.metrics.emergency_count > 0
    }

    /// The spending panel is only meaningful when a goal is set that the salary covers.
    pub(crate) fn shows_spending_panel(&self) -> bool {
        self.goal_fits_salary
    }

    /// Rows taken by the spending panel on the Expenses screen, borders included.
    pub(crate) fn spending_panel_height(&self) -> u16 {
        match (self.shows_spending_panel(), self.has_emergency()) {
            (false, _) => 0,
            (true, false) => 5,
            (true, true) => 9,
        }
    }

    /// Expense rows visible below the cards and the spending panel.
    pub(crate) fn expense_page(&self) -> usize {
        // 5 card rows plus the table's borders and header
        let overhead = 5 + self.spending_panel_height() as usize + 3;
        self.visible_rows.saturating_sub(overhead).max(1)
    }

    pub(crate) fn savings_page(&self) -> usize {
        // Total card plus the list's borders
        self.visible_rows.saturating_sub(5 + 2).max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
