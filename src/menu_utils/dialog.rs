//! Thin builder facade over the `dialoguer` prompt primitives.
//!
//! Screens talk to this module only; swapping the prompt toolkit means
//! touching one file. The builder carries the shared knobs (prompt text,
//! header line, button labels) and exposes one terminal method per dialog
//! kind.

use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};

/// Types that can be offered in selection menus.
pub trait Selectable {
    /// Line shown in the menu.
    fn display_text(&self) -> String;

    /// Initial checked state for multi-select menus.
    fn initially_checked(&self) -> bool {
        false
    }
}

impl Selectable for String {
    fn display_text(&self) -> String {
        self.clone()
    }
}

impl Selectable for &str {
    fn display_text(&self) -> String {
        self.to_string()
    }
}

/// Result of a selection dialog.
#[derive(Debug, PartialEq)]
pub enum SelectResult<T> {
    Selected(T),
    MultiSelected(Vec<T>),
    Cancelled,
}

/// Result of a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Yes,
    No,
    Cancelled,
}

#[derive(Default)]
pub struct Dialog {
    prompt: String,
    header: Option<String>,
    initial: Option<String>,
    confirm_message: Option<String>,
    yes_text: Option<String>,
    no_text: Option<String>,
    allow_empty: bool,
}

impl Dialog {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Dimmed context line printed above the dialog.
    pub fn header<S: Into<String>>(mut self, header: S) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Prefill for input dialogs.
    pub fn initial<S: Into<String>>(mut self, value: S) -> Self {
        self.initial = Some(value.into());
        self
    }

    pub fn confirm<S: Into<String>>(mut self, message: S) -> Self {
        self.confirm_message = Some(message.into());
        self
    }

    pub fn yes_text<S: Into<String>>(mut self, text: S) -> Self {
        self.yes_text = Some(text.into());
        self
    }

    pub fn no_text<S: Into<String>>(mut self, text: S) -> Self {
        self.no_text = Some(text.into());
        self
    }

    /// Accept an empty line in input/password dialogs.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    fn print_header(&self) {
        if let Some(header) = &self.header {
            println!("{}", header.dimmed());
        }
    }

    /// Single-choice menu. Esc cancels.
    pub fn select<T: Selectable + Clone>(self, items: Vec<T>) -> Result<SelectResult<T>> {
        if items.is_empty() {
            return Ok(SelectResult::Cancelled);
        }
        self.print_header();
        let labels: Vec<String> = items.iter().map(Selectable::display_text).collect();
        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(self.prompt.clone())
            .items(&labels)
            .default(0)
            .interact_opt()?;

        Ok(match picked {
            Some(index) => SelectResult::Selected(items[index].clone()),
            None => SelectResult::Cancelled,
        })
    }

    /// Multi-choice menu with per-item initial state. Esc cancels; an
    /// empty confirmed selection is a valid (empty) result.
    pub fn select_many<T: Selectable + Clone>(self, items: Vec<T>) -> Result<SelectResult<T>> {
        if items.is_empty() {
            return Ok(SelectResult::MultiSelected(Vec::new()));
        }
        self.print_header();
        let labels: Vec<String> = items.iter().map(Selectable::display_text).collect();
        let checked: Vec<bool> = items.iter().map(Selectable::initially_checked).collect();
        let picked = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(self.prompt.clone())
            .items(&labels)
            .defaults(&checked)
            .interact_opt()?;

        Ok(match picked {
            Some(indexes) => SelectResult::MultiSelected(
                indexes.into_iter().map(|i| items[i].clone()).collect(),
            ),
            None => SelectResult::Cancelled,
        })
    }

    /// Free-text input. Returns the trimmed line.
    pub fn input_dialog(self) -> Result<String> {
        self.print_header();
        let theme = ColorfulTheme::default();
        let value = match &self.initial {
            Some(initial) => Input::<String>::with_theme(&theme)
                .with_prompt(self.prompt.clone())
                .allow_empty(self.allow_empty)
                .with_initial_text(initial.clone())
                .interact_text()?,
            None => Input::<String>::with_theme(&theme)
                .with_prompt(self.prompt.clone())
                .allow_empty(self.allow_empty)
                .interact_text()?,
        };
        Ok(value.trim().to_string())
    }

    /// Hidden input for credentials.
    pub fn password_dialog(self) -> Result<String> {
        self.print_header();
        let password = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(self.prompt.clone())
            .allow_empty_password(self.allow_empty)
            .interact()?;
        Ok(password)
    }

    /// Yes/no gate. Esc maps to `Cancelled`, which callers treat as No.
    pub fn show_confirmation(self) -> Result<ConfirmResult> {
        self.print_header();
        let mut message = self.confirm_message.clone().unwrap_or_default();
        if let (Some(yes), Some(no)) = (&self.yes_text, &self.no_text) {
            message = format!("{message} [{yes}/{no}]");
        }
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact_opt()?;

        Ok(match answer {
            Some(true) => ConfirmResult::Yes,
            Some(false) => ConfirmResult::No,
            None => ConfirmResult::Cancelled,
        })
    }
}
