//! Buttons and toggles rendered as styled spans

use crate::store::{Sink, Source};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Ghost,
}

impl ButtonVariant {
    /// Unknown names fall back to `Primary`
    pub fn parse(name: &str) -> Self {
        match name {
            "secondary" => ButtonVariant::Secondary,
            "success" => ButtonVariant::Success,
            "danger" => ButtonVariant::Danger,
            "warning" => ButtonVariant::Warning,
            "ghost" => ButtonVariant::Ghost,
            _ => ButtonVariant::Primary,
        }
    }

    pub fn style(&self) -> Style {
        match self {
            ButtonVariant::Primary => Style::default().fg(Color::White).bg(Color::Blue),
            ButtonVariant::Secondary => Style::default().fg(Color::White).bg(Color::DarkGray),
            ButtonVariant::Success => Style::default().fg(Color::White).bg(Color::Green),
            ButtonVariant::Danger => Style::default().fg(Color::White).bg(Color::Red),
            ButtonVariant::Warning => Style::default().fg(Color::Black).bg(Color::Yellow),
            ButtonVariant::Ghost => Style::default().fg(Color::Gray),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    /// Unknown names fall back to `Medium`
    pub fn parse(name: &str) -> Self {
        match name {
            "sm" => ButtonSize::Small,
            "lg" => ButtonSize::Large,
            _ => ButtonSize::Medium,
        }
    }

    fn padding(&self) -> usize {
        match self {
            ButtonSize::Small => 1,
            ButtonSize::Medium => 2,
            ButtonSize::Large => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub disabled: bool,
    pub loading: bool,
    pub loading_text: String,
}

impl Button {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            loading: false,
            loading_text: "...".to_string(),
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn loading(mut self, loading: bool, text: &str) -> Self {
        self.loading = loading;
        self.loading_text = text.to_string();
        self
    }

    /// Loading buttons are disabled too
    pub fn is_disabled(&self) -> bool {
        self.disabled || self.loading
    }

    pub fn text(&self) -> &str {
        if self.loading {
            &self.loading_text
        } else {
            &self.label
        }
    }

    /// Returns whether the press was accepted
    pub fn press(&self) -> bool {
        !self.is_disabled()
    }

    pub fn span(&self) -> Span<'static> {
        let pad = " ".repeat(self.size.padding());
        let mut style = self.variant.style().add_modifier(Modifier::BOLD);
        if self.is_disabled() {
            style = style.add_modifier(Modifier::DIM);
        }
        Span::styled(format!("{}{}{}", pad, self.text(), pad), style)
    }
}

/// Two-state button bound to a boolean in the store
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonToggle {
    pub label: String,
    pub status: Option<String>,
    pub on_style: Style,
    pub off_style: Style,
}

impl ButtonToggle {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            status: None,
            on_style: Style::default().fg(Color::Yellow).bg(Color::Green),
            off_style: Style::default().fg(Color::Red).bg(Color::Gray),
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    /// Write the negated value; the hook sees the new value
    pub fn toggle(
        &self,
        current: &impl Source<bool>,
        target: &mut impl Sink<bool>,
        on_click: Option<&mut dyn FnMut(bool)>,
    ) -> bool {
        let next = !current.read();
        target.write(next);
        if let Some(hook) = on_click {
            hook(next);
        }
        next
    }

    pub fn span(&self, current: &impl Source<bool>) -> Span<'static> {
        let style = if current.read() {
            self.on_style
        } else {
            self.off_style
        };
        let text = match &self.status {
            Some(status) => format!("  {} ({})  ", self.label, status),
            None => format!("  {}  ", self.label),
        };
        Span::styled(text, style.add_modifier(Modifier::BOLD))
    }
}
