//! Root application component
//!
//! Owns the panel definition, the device store and one ParameterControl per
//! axis, and applies every Action to them. Widgets never touch the store
//! directly; the App hands each one a snapshot and a sink for the store
//! operation the widget asked for.

use crate::action::Action;
use crate::component::Component;
use crate::components::button::{ButtonSize, ButtonVariant};
use crate::components::card::{CardGrid, GridColumns};
use crate::components::service_card::refresh_button;
use crate::components::{
    draw_panel_screen, ButtonToggle, ConfirmDialog, ConnectionControl, ConnectionRequest,
    FiducialList, HelpDialog, HomeComponent, PanelRenderContext, ParameterControl, TabGroup,
};
use crate::config::Config;
use crate::model::fiducial::remove_fiducial;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{
    EditField, Fiducial, FlashMessage, PanelDefinition, RangeViolation, ServiceKind, Status,
    TabView,
};
use crate::services::{demo_panel, load_panel, SimulatedStore};
use crate::store::AxisStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::path::Path;
use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    pub panel: PanelDefinition,
    pub store: SimulatedStore,

    /// Modal overlay stack
    pub modals: ModalStack,

    pub should_quit: bool,

    /// Why the configured panel file was not used
    pub load_error: Option<String>,

    /// Short-lived app messages ("Homing ...")
    pub status: FlashMessage,

    last_tick: Instant,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub tabs: TabGroup,
    /// One control per axis, in panel order
    pub controls: Vec<ParameterControl>,
    /// Control indices shown on each tab
    tab_rows: Vec<Vec<usize>>,
    pub fiducials: Vec<Fiducial>,
    pub fiducial_list: FiducialList,
    pub help_dialog: HelpDialog,
    connection: ConnectionControl,
    service_grid: CardGrid,
    home_variant: ButtonVariant,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Build the app from `config`, falling back to the demo panel
    pub fn new(config: &Config) -> App {
        let (panel, load_error) = match config.panel_path.as_deref() {
            Some(path) => match load_panel(Path::new(path)) {
                Ok(panel) => (panel, None),
                Err(e) => {
                    let message = error_chain(&e);
                    tracing::error!(error = %message, "panel file rejected, using demo panel");
                    (demo_panel(), Some(message))
                }
            },
            None => (demo_panel(), None),
        };

        Self::with_panel(config, panel, load_error)
    }

    pub fn with_panel(config: &Config, panel: PanelDefinition, load_error: Option<String>) -> App {
        let store = SimulatedStore::from_panel(&panel);
        let button_size = ButtonSize::parse(&panel.style.button_size);

        let mut controls = Vec::new();
        let mut tab_rows = Vec::new();
        for tab in &panel.tabs {
            let mut rows = Vec::new();
            for spec in &tab.axes {
                rows.push(controls.len());
                let mut control = ParameterControl::from_spec(spec)
                    .with_error_duration(config.error_display())
                    .with_validation_hook(Box::new(log_violation));
                control.options.button_size = button_size;
                controls.push(control);
            }
            tab_rows.push(rows);
        }

        let mut home = HomeComponent::new(panel.tabs.len());
        if let Some(first) = panel.tabs.first() {
            home.set_tab(0, first.view);
        }

        let mut fiducial_list = FiducialList::default();
        fiducial_list.clamp(panel.fiducials.len());

        let mut app = App {
            status: FlashMessage::new(config.error_display()),
            service_grid: CardGrid::new(GridColumns::parse(&panel.style.service_columns)),
            home_variant: ButtonVariant::parse(&panel.style.home_variant),
            tabs: TabGroup::from_specs(&panel.tabs),
            fiducials: panel.fiducials.clone(),
            panel,
            store,
            modals: ModalStack::new(),
            should_quit: false,
            load_error,
            last_tick: Instant::now(),
            home,
            controls,
            tab_rows,
            fiducial_list,
            help_dialog: HelpDialog::default(),
            connection: ConnectionControl::default(),
        };
        app.sync_controls();
        app
    }

    fn home_dialog(&self, label: &str) -> ConfirmDialog {
        ConfirmDialog::home(label).variant(self.home_variant)
    }

    fn active_view(&self) -> TabView {
        self.panel
            .tabs
            .get(self.tabs.active_index())
            .map(|t| t.view)
            .unwrap_or_default()
    }

    fn active_rows(&self) -> &[usize] {
        self.tab_rows
            .get(self.tabs.active_index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Index into `controls` of the focused axis row
    fn focused_control(&self) -> Option<usize> {
        if self.active_view() != TabView::Axes {
            return None;
        }
        self.active_rows().get(self.home.focused()).copied()
    }

    /// Advance simulated motion and expire messages
    pub fn tick(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.store.advance(elapsed);
        for control in &mut self.controls {
            control.expire(now);
        }
        self.status.expire(now);
        self.sync_controls();
    }

    /// Refresh idle edit buffers from the store
    fn sync_controls(&mut self) {
        for control in &mut self.controls {
            let state = self.store.axis(&control.device_name);
            control.sync(&state);
        }
    }

    fn switch_tab(&mut self, forward: bool) {
        if let Some(i) = self.focused_control() {
            self.controls[i].cancel_edit();
        }
        let switched = if forward {
            self.tabs.next().is_some()
        } else {
            self.tabs.prev().is_some()
        };
        if switched {
            let view = self.active_view();
            self.home.set_tab(self.tabs.active_index(), view);
            let len = self.row_count();
            self.home.clamp(len);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Axis Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_axis_action(&mut self, action: Action, now: Instant) {
        let Some(i) = self.focused_control() else {
            return;
        };
        let control = &mut self.controls[i];
        let store = &mut self.store;
        let name = control.device_name.clone();
        if action == Action::Stop {
            if control.can_stop() {
                store.stop(&name);
            }
            return;
        }

        let state = store.axis(&name);
        let mut set_target = |raw: f64| store.set_target(&name, raw);
        match action {
            Action::Increment => {
                control.increment(&state, &mut set_target, now);
            }
            Action::Decrement => {
                control.decrement(&state, &mut set_target, now);
            }
            Action::NextStore => {
                control.next_store(&state, &mut set_target, now);
            }
            Action::NextUnit => control.next_unit(),
            _ => {}
        }
    }

    fn begin_edit(&mut self, field: EditField, now: Instant) {
        let Some(i) = self.focused_control() else {
            return;
        };
        let state = self.store.axis(&self.controls[i].device_name);
        let control = &mut self.controls[i];
        control.begin_edit(field, &state);
        self.home.editing = control.editing().is_some();
        if !self.home.editing && control.inputs_disabled(&state) {
            self.status
                .show(format!("Home {} before moving it", control.label), now);
        }
    }

    fn commit_edit(&mut self, now: Instant) {
        self.home.editing = false;
        let Some(i) = self.focused_control() else {
            return;
        };
        let control = &mut self.controls[i];
        let Some((field, text)) = control.finish_edit() else {
            return;
        };
        let store = &mut self.store;
        let name = control.device_name.clone();
        let state = store.axis(&name);
        match field {
            EditField::Target => {
                control.commit_target(&text, &state, &mut |raw: f64| store.set_target(&name, raw), now);
            }
            EditField::Increment => {
                control.commit_increment(
                    &text,
                    &state,
                    &mut |value: f64| store.set_increment(&name, value),
                    now,
                );
            }
        }
    }

    fn toggle_connection(&mut self) {
        match self.active_view() {
            TabView::Axes => {
                let Some(i) = self.focused_control() else {
                    return;
                };
                let control = &self.controls[i];
                let store = &mut self.store;
                let name = control.device_name.clone();
                let connected = store.axis(&name).is_connected;
                let mut log = |now_connected: bool| {
                    tracing::info!(axis = %name, connected = now_connected, "connection toggled");
                };
                ButtonToggle::new(&control.label).toggle(
                    &|| connected,
                    &mut |value: bool| store.set_connected(&name, value),
                    Some(&mut log),
                );
            }
            TabView::Services => {
                let index = self.home.focused();
                let services = self.store.services();
                let Some(service) = services.get(index) else {
                    return;
                };
                let connecting = service.status == Status::Connecting;
                let connected = service.status == Status::Connected;
                match self.connection.toggle(connected, connecting) {
                    Some(ConnectionRequest::Connect) => self.store.connect_service(index),
                    Some(ConnectionRequest::Disconnect) => self.store.disconnect_service(index),
                    None => {}
                }
            }
            TabView::Fiducials => {}
        }
    }

    fn check_service(&mut self) {
        if self.active_view() != TabView::Services {
            return;
        }
        let index = self.home.focused();
        let services = self.store.services();
        if let Some(service) = services.get(index) {
            if service.kind == ServiceKind::Http && refresh_button(service).press() {
                self.store.check_service(index);
            }
        }
    }

    fn delete_fiducial(&mut self) {
        if self.active_view() != TabView::Fiducials {
            return;
        }
        if let Some(key) = self.fiducial_list.delete_request(&self.fiducials) {
            if remove_fiducial(&mut self.fiducials, &key) {
                tracing::info!(fiducial = ?key, "fiducial deleted");
            }
            self.fiducial_list.clamp(self.fiducials.len());
        }
    }

    fn row_count(&self) -> usize {
        match self.active_view() {
            TabView::Axes => self.active_rows().len(),
            TabView::Services => self.store.services().len(),
            TabView::Fiducials => self.fiducials.len(),
        }
    }
}

/// One-line rendering of an error and its causes
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn log_violation(violation: &RangeViolation) {
    tracing::warn!(
        device = %violation.device_name,
        requested = violation.requested,
        clamped = violation.clamped,
        min = ?violation.min,
        max = ?violation.max,
        unit = %violation.unit,
        "{}",
        violation.error
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        tracing::info!(
            title = %self.panel.title,
            tabs = self.panel.tabs.len(),
            axes = self.controls.len(),
            services = self.panel.services.len(),
            "panel loaded"
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        match self.modals.top().cloned() {
            Some(Modal::QuitConfirm) => ConfirmDialog::quit().handle_key_event(key),
            Some(Modal::HomeConfirm { label, .. }) => self.home_dialog(&label).handle_key_event(key),
            Some(Modal::Help) => self.help_dialog.handle_key_event(key),
            None => self.home.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let now = Instant::now();
        let is_tick = action == Action::Tick;
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.tick(now),
            Action::ForceQuit => self.should_quit = true,
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextTab => self.switch_tab(true),
            Action::PrevTab => self.switch_tab(false),
            Action::NextItem => match self.active_view() {
                TabView::Fiducials => self.fiducial_list.select_next(self.fiducials.len()),
                _ => {
                    let len = self.row_count();
                    self.home.next(len);
                }
            },
            Action::PrevItem => match self.active_view() {
                TabView::Fiducials => self.fiducial_list.select_prev(self.fiducials.len()),
                _ => self.home.previous(),
            },

            // ─────────────────────────────────────────────────────────────────
            // Axis Control
            // ─────────────────────────────────────────────────────────────────
            Action::Increment
            | Action::Decrement
            | Action::NextStore
            | Action::NextUnit
            | Action::Stop => self.apply_axis_action(action, now),
            Action::EditTarget => self.begin_edit(EditField::Target, now),
            Action::EditIncrement => self.begin_edit(EditField::Increment, now),
            Action::EditInput(c) => {
                if let Some(i) = self.focused_control() {
                    self.controls[i].edit_input(c);
                }
            }
            Action::EditBackspace => {
                if let Some(i) = self.focused_control() {
                    self.controls[i].edit_backspace();
                }
            }
            Action::CommitEdit => self.commit_edit(now),
            Action::CancelEdit => {
                self.home.editing = false;
                if let Some(i) = self.focused_control() {
                    self.controls[i].cancel_edit();
                }
            }
            Action::OpenHomeConfirm => {
                if let Some(i) = self.focused_control() {
                    let control = &self.controls[i];
                    if control.can_home() {
                        self.modals.push(Modal::HomeConfirm {
                            axis: control.device_name.clone(),
                            label: control.label.clone(),
                        });
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Services & Fiducials
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleConnection => self.toggle_connection(),
            Action::CheckService => self.check_service(),
            Action::DeleteFiducial => self.delete_fiducial(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(Modal::HomeConfirm { axis, label }) = self.modals.pop() {
                    self.store.home(&axis);
                    self.status.show(format!("Homing {}", label), now);
                }
            }
        }

        if !is_tick {
            self.sync_controls();
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let now = Instant::now();
        let services = self.store.services();
        let tab_name = self
            .panel
            .tabs
            .get(self.tabs.active_index())
            .map(|t| t.name.as_str())
            .unwrap_or("");

        let axes = self
            .active_rows()
            .iter()
            .map(|&i| {
                let control = &self.controls[i];
                (control, self.store.axis(&control.device_name))
            })
            .collect();

        let ctx = PanelRenderContext {
            title: &self.panel.title,
            tab_name,
            axes,
            services: &services,
            fiducials: &self.fiducials,
            load_error: self.load_error.as_deref(),
            status_message: self.status.visible_at(now),
            service_grid: self.service_grid,
            now,
        };

        draw_panel_screen(
            frame,
            area,
            &self.home,
            &self.tabs,
            &mut self.fiducial_list,
            &ctx,
        );

        match self.modals.top() {
            Some(Modal::QuitConfirm) => ConfirmDialog::quit().draw(frame, area)?,
            Some(Modal::HomeConfirm { label, .. }) => self.home_dialog(label).draw(frame, area)?,
            Some(Modal::Help) => self.help_dialog.draw(frame, area)?,
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::panel::parse_panel;
    use std::time::Duration;

    const PANEL: &str = r#"
title: Test Bench
tabs:
  - id: main
    name: Main
    axes:
      - name: Stage.X
        label: Stage X
        initial: 100
        increment: 0.5
        speed: 1000
        config:
          min: 0
          max: 1000
          units:
            - { name: mm, slope: 0.01, precision: 2 }
          stores:
            - { name: Park, raw: 0 }
            - { name: Far, raw: 5000 }
      - name: Lens
        requires_home: true
        show_home_button: true
        initial: 40
        speed: 100
  - id: svc
    name: Services
    view: services
  - id: fid
    name: Fiducials
    view: fiducials
services:
  - { name: Motion, kind: websocket }
  - { name: Camera, kind: http }
fiducials:
  - { id: F1, computed: { x: 1, y: 2 } }
  - { computed: { x: 3, y: 4 } }
"#;

    fn app() -> App {
        App::with_panel(&Config::default(), parse_panel(PANEL).unwrap(), None)
    }

    fn run(app: &mut App, actions: &[Action]) {
        for action in actions {
            app.update(action.clone()).unwrap();
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_increment_writes_target_in_raw_units() {
        let mut app = app();
        run(&mut app, &[Action::Increment]);
        assert!(close(app.store.axis("Stage.X").target, 150.0));
    }

    #[test]
    fn test_out_of_range_typed_target_is_clamped_and_reported() {
        let mut app = app();
        run(&mut app, &[Action::EditTarget]);
        assert!(app.home.editing);
        run(
            &mut app,
            &[
                Action::EditInput('9'),
                Action::EditInput('9'),
                Action::CommitEdit,
            ],
        );
        assert!(!app.home.editing);
        assert!(close(app.store.axis("Stage.X").target, 1000.0));
        assert_eq!(
            app.controls[0].error_at(Instant::now()),
            Some("Value 99.000mm is above maximum limit of 10.000mm")
        );

        let later = Instant::now() + Duration::from_secs(4);
        app.tick(later);
        assert!(app.controls[0].error_at(later).is_none());
    }

    #[test]
    fn test_store_recall_moves_to_selected_preset() {
        let mut app = app();
        run(&mut app, &[Action::NextStore]);
        assert!(close(app.store.axis("Stage.X").target, 1000.0));
        run(&mut app, &[Action::NextStore]);
        assert!(close(app.store.axis("Stage.X").target, 0.0));
    }

    #[test]
    fn test_unhomed_axis_needs_homing_first() {
        let mut app = app();
        run(&mut app, &[Action::NextItem, Action::Increment]);
        assert_eq!(app.store.axis("Lens").target, 40.0);

        run(&mut app, &[Action::EditTarget]);
        assert!(!app.home.editing);
        assert!(app.status.visible_at(Instant::now()).is_some());

        run(&mut app, &[Action::OpenHomeConfirm]);
        assert!(matches!(app.modals.top(), Some(Modal::HomeConfirm { .. })));
        run(&mut app, &[Action::ConfirmModal]);
        assert!(app.modals.top().is_none());

        app.tick(Instant::now() + Duration::from_secs(2));
        assert!(app.store.axis("Lens").is_homed);

        run(&mut app, &[Action::Increment]);
        assert_eq!(app.store.axis("Lens").target, 1.0);
    }

    #[test]
    fn test_home_confirm_requires_home_button() {
        let mut app = app();
        run(&mut app, &[Action::OpenHomeConfirm]);
        assert!(app.modals.top().is_none());
    }

    #[test]
    fn test_stop_holds_position() {
        let mut app = app();
        run(&mut app, &[Action::Increment, Action::Stop]);
        let x = app.store.axis("Stage.X");
        assert_eq!(x.target, x.current);
    }

    #[test]
    fn test_toggle_axis_connection() {
        let mut app = app();
        run(&mut app, &[Action::ToggleConnection]);
        assert!(!app.store.axis("Stage.X").is_connected);
        run(&mut app, &[Action::ToggleConnection]);
        assert!(app.store.axis("Stage.X").is_connected);
    }

    #[test]
    fn test_service_actions() {
        let mut app = app();
        run(&mut app, &[Action::NextTab]);
        assert_eq!(app.home.view, TabView::Services);

        run(&mut app, &[Action::ToggleConnection]);
        assert_eq!(app.store.services()[0].status, Status::Disconnected);

        run(&mut app, &[Action::NextItem, Action::CheckService]);
        assert_eq!(app.store.services()[1].status, Status::Connecting);
        run(&mut app, &[Action::ToggleConnection]);
        assert_eq!(app.store.services()[1].status, Status::Connecting);
    }

    #[test]
    fn test_delete_fiducials_by_id_then_index() {
        let mut app = app();
        run(&mut app, &[Action::PrevTab]);
        assert_eq!(app.home.view, TabView::Fiducials);

        run(&mut app, &[Action::DeleteFiducial]);
        assert_eq!(app.fiducials.len(), 1);
        assert!(app.fiducials[0].id.is_none());

        run(&mut app, &[Action::DeleteFiducial]);
        assert!(app.fiducials.is_empty());
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app();
        let key = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(key, Some(Action::OpenQuitDialog));
        run(&mut app, &[Action::OpenQuitDialog]);

        let confirm = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(confirm, Some(Action::ForceQuit));
        run(&mut app, &[Action::ForceQuit]);
        assert!(app.should_quit);
    }

    #[test]
    fn test_rejected_panel_falls_back_to_demo() {
        let dir = std::env::temp_dir().join(format!("labpanel-app-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad-preset.yaml");
        let yaml = PANEL.replace("raw: 5000", "raw: .nan");
        std::fs::write(&path, yaml).unwrap();

        let config = Config {
            panel_path: Some(path.display().to_string()),
            ..Config::default()
        };
        let app = App::new(&config);
        assert_eq!(app.panel.title, "Spectrometer Bench");
        assert_eq!(
            app.load_error.as_deref(),
            Some("axis 'Stage.X': preset 'Far' has a non-finite position")
        );
        assert!(app.store.axis("Grating.X").is_connected);
    }

    #[test]
    fn test_unreadable_panel_reports_cause() {
        let config = Config {
            panel_path: Some("/nonexistent/labpanel/bench.yaml".to_string()),
            ..Config::default()
        };
        let app = App::new(&config);
        let error = app.load_error.unwrap();
        assert!(error.starts_with("failed to read panel file /nonexistent/labpanel/bench.yaml: "));
        assert_eq!(app.panel.title, "Spectrometer Bench");
    }

    #[test]
    fn test_tab_switch_cancels_edit() {
        let mut app = app();
        run(&mut app, &[Action::EditTarget, Action::EditInput('5'), Action::NextTab]);
        assert!(!app.home.editing);
        assert_eq!(app.controls[0].editing(), None);
        run(&mut app, &[Action::PrevTab]);
        assert_eq!(app.home.view, TabView::Axes);
    }

    #[test]
    fn test_panel_style_reaches_widgets() {
        let yaml = PANEL.replace(
            "title: Test Bench\n",
            "title: Test Bench\nstyle:\n  service_columns: \"1\"\n  button_size: lg\n  home_variant: danger\n",
        );
        let app = App::with_panel(&Config::default(), parse_panel(&yaml).unwrap(), None);
        assert_eq!(app.controls[0].options.button_size, ButtonSize::Large);
        assert_eq!(app.service_grid.columns, GridColumns::Fixed(1));
        assert_eq!(app.home_dialog("Lens").confirm_variant, ButtonVariant::Danger);

        let plain = self::app();
        assert_eq!(plain.controls[0].options.button_size, ButtonSize::Small);
        assert_eq!(plain.service_grid.columns, GridColumns::Auto);
        assert_eq!(plain.home_dialog("Lens").confirm_variant, ButtonVariant::Warning);
    }
}
