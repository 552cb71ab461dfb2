//! Simulated device store
//!
//! Stands in for the driver layer so the panel can run without hardware.
//! Each axis travels toward its target at a fixed speed when `advance` is
//! called from the tick handler. Homing drives the axis to raw 0 and marks it
//! homed on arrival.

use crate::model::{AxisState, PanelDefinition, ServiceKind, ServiceState, Status};
use crate::store::AxisStore;
use chrono::Local;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct SimulatedAxis {
    state: AxisState,
    /// Raw units per second
    speed: f64,
    homing: bool,
}

/// In-process implementation of [`AxisStore`]
#[derive(Debug, Default)]
pub struct SimulatedStore {
    axes: HashMap<String, SimulatedAxis>,
    services: Vec<ServiceState>,
}

impl SimulatedStore {
    /// Build a store with every axis and service of the panel
    ///
    /// Axes start connected; axes that require homing start un-homed.
    pub fn from_panel(panel: &PanelDefinition) -> Self {
        let axes = panel
            .axes()
            .map(|spec| {
                let state = AxisState {
                    current: spec.initial,
                    target: spec.initial,
                    increment: spec.increment,
                    is_connected: true,
                    is_homed: !spec.requires_home,
                    is_moving: false,
                };
                let axis = SimulatedAxis {
                    state,
                    speed: spec.speed.abs(),
                    homing: false,
                };
                (spec.name.clone(), axis)
            })
            .collect();

        let services = panel
            .services
            .iter()
            .map(|spec| {
                let mut service = ServiceState::from_spec(spec);
                if service.kind == ServiceKind::WebSocket {
                    service.status = Status::Connected;
                }
                service
            })
            .collect();

        Self { axes, services }
    }

    /// Move every axis toward its target by `elapsed` worth of travel
    pub fn advance(&mut self, elapsed: Duration) {
        let dt = elapsed.as_secs_f64();
        for (name, axis) in self.axes.iter_mut() {
            let state = &mut axis.state;
            if !state.is_connected {
                state.is_moving = false;
                continue;
            }

            let remaining = state.target - state.current;
            let step = axis.speed * dt;
            if axis.speed <= 0.0 || remaining.abs() <= step {
                state.current = state.target;
                if state.is_moving {
                    tracing::debug!(axis = %name, position = state.current, "axis settled");
                }
                state.is_moving = false;
                if axis.homing {
                    axis.homing = false;
                    state.is_homed = true;
                    tracing::info!(axis = %name, "axis homed");
                }
            } else {
                state.current += step.copysign(remaining);
                state.is_moving = true;
            }
        }

        for service in &mut self.services {
            if service.status == Status::Connecting {
                service.status = Status::Connected;
                service.last_checked = Some(Local::now());
            }
        }
    }
}

impl AxisStore for SimulatedStore {
    fn axis(&self, name: &str) -> AxisState {
        self.axes
            .get(name)
            .map(|a| a.state.clone())
            .unwrap_or_default()
    }

    fn set_target(&mut self, name: &str, raw: f64) {
        if let Some(axis) = self.axes.get_mut(name) {
            tracing::debug!(axis = %name, target = raw, "target set");
            axis.state.target = raw;
        }
    }

    fn set_increment(&mut self, name: &str, increment: f64) {
        if let Some(axis) = self.axes.get_mut(name) {
            axis.state.increment = increment;
        }
    }

    fn stop(&mut self, name: &str) {
        if let Some(axis) = self.axes.get_mut(name) {
            tracing::info!(axis = %name, position = axis.state.current, "axis stopped");
            axis.state.target = axis.state.current;
            axis.state.is_moving = false;
            axis.homing = false;
        }
    }

    fn home(&mut self, name: &str) {
        if let Some(axis) = self.axes.get_mut(name) {
            tracing::info!(axis = %name, "homing started");
            axis.state.target = 0.0;
            axis.state.is_homed = false;
            axis.homing = true;
        }
    }

    fn set_connected(&mut self, name: &str, connected: bool) {
        if let Some(axis) = self.axes.get_mut(name) {
            tracing::info!(axis = %name, connected, "axis connection changed");
            axis.state.is_connected = connected;
            if !connected {
                axis.state.is_moving = false;
            }
        }
    }

    fn services(&self) -> Vec<ServiceState> {
        self.services.clone()
    }

    fn connect_service(&mut self, index: usize) {
        if let Some(service) = self.services.get_mut(index) {
            service.status = Status::Connecting;
            service.error = None;
            if service.kind == ServiceKind::WebSocket {
                service.reconnect_attempts += 1;
            }
        }
    }

    fn disconnect_service(&mut self, index: usize) {
        if let Some(service) = self.services.get_mut(index) {
            service.status = Status::Disconnected;
        }
    }

    fn check_service(&mut self, index: usize) {
        if let Some(service) = self.services.get_mut(index) {
            if service.kind == ServiceKind::Http && !service.status.is_busy() {
                tracing::debug!(service = %service.name, "service check requested");
                service.status = Status::Connecting;
            }
        }
    }
}
