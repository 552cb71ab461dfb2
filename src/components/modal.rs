//! Confirmation dialog
//!
//! A centered popup with an optional title, a body and up to two buttons.
//! Pressing cancel emits the cancel action when one is set and closes the
//! dialog otherwise.

use crate::action::Action;
use crate::component::Component;
use crate::components::button::{Button, ButtonSize, ButtonVariant};
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ModalSize {
    fn width(&self) -> u16 {
        match self {
            ModalSize::Small => 40,
            ModalSize::Medium => 52,
            ModalSize::Large => 64,
        }
    }

    fn button_size(&self) -> ButtonSize {
        match self {
            ModalSize::Small => ButtonSize::Small,
            ModalSize::Medium => ButtonSize::Medium,
            ModalSize::Large => ButtonSize::Large,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDialog {
    pub title: Option<String>,
    pub body: Vec<String>,
    pub confirm_text: String,
    pub cancel_text: String,
    pub show_confirm: bool,
    pub show_cancel: bool,
    pub confirm_variant: ButtonVariant,
    pub size: ModalSize,
    /// Emitted on confirm
    pub on_confirm: Option<Action>,
    /// Emitted on cancel instead of closing
    pub on_cancel: Option<Action>,
}

impl ConfirmDialog {
    pub fn new(body: &str) -> Self {
        Self {
            title: None,
            body: body.lines().map(str::to_string).collect(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            show_confirm: true,
            show_cancel: true,
            confirm_variant: ButtonVariant::Primary,
            size: ModalSize::default(),
            on_confirm: None,
            on_cancel: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn confirm(mut self, text: &str, action: Action) -> Self {
        self.confirm_text = text.to_string();
        self.on_confirm = Some(action);
        self
    }

    pub fn cancel_text(mut self, text: &str) -> Self {
        self.cancel_text = text.to_string();
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.confirm_variant = variant;
        self
    }

    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    pub fn quit() -> Self {
        Self::new("Are you sure you want to quit?")
            .title("Quit?")
            .confirm("Yes, quit", Action::ForceQuit)
            .cancel_text("No, cancel")
            .variant(ButtonVariant::Danger)
            .size(ModalSize::Small)
    }

    pub fn home(label: &str) -> Self {
        Self::new(&format!(
            "Home {}?\nThe axis will travel to its reference position.",
            label
        ))
        .title("Home Motor")
        .confirm("Home", Action::ConfirmModal)
        .variant(ButtonVariant::Warning)
        .size(ModalSize::Large)
    }

    pub fn press_confirm(&self) -> Option<Action> {
        if !self.show_confirm {
            return None;
        }
        self.on_confirm.clone()
    }

    pub fn press_cancel(&self) -> Option<Action> {
        if !self.show_cancel {
            return None;
        }
        Some(self.on_cancel.clone().unwrap_or(Action::CloseModal))
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.press_confirm(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.press_cancel(),
            // Esc always dismisses, like the close button in the title
            KeyCode::Esc => Some(self.press_cancel().unwrap_or(Action::CloseModal)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let has_buttons = self.show_confirm || self.show_cancel;
        let height = self.body.len() as u16 + if has_buttons { 6 } else { 4 };
        let popup_area = centered_popup(area, self.size.width(), height);

        frame.render_widget(Clear, popup_area);

        let mut content = vec![Line::from("")];
        for line in &self.body {
            content.push(Line::from(Span::styled(
                line.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
        }

        if has_buttons {
            content.push(Line::from(""));
            let mut buttons = Vec::new();
            if self.show_cancel {
                buttons.push(Span::styled(" n/Esc ", Style::default().fg(Color::Gray)));
                buttons.push(
                    Button::new(&self.cancel_text)
                        .variant(ButtonVariant::Secondary)
                        .size(self.size.button_size())
                        .span(),
                );
                buttons.push(Span::raw("  "));
            }
            if self.show_confirm {
                buttons.push(Span::styled(" y ", Style::default().fg(Color::Gray)));
                buttons.push(
                    Button::new(&self.confirm_text)
                        .variant(self.confirm_variant)
                        .size(self.size.button_size())
                        .span(),
                );
            }
            content.push(Line::from(buttons));
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        if let Some(title) = &self.title {
            block = block.title(format!(" {} ", title)).title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        let paragraph = Paragraph::new(content)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
