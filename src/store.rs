//! Store capabilities
//!
//! Widgets never own device state. They read it through a [`Source`] and hand
//! new values to a [`Sink`]. Plain closures implement both, so a caller can
//! bind a widget to any backing store:
//!
//! ```ignore
//! control.increment(&state, |raw: f64| store.set_target("Grating.X", raw), now);
//! ```

use crate::model::{AxisState, ServiceState};

/// Read side of a bound value
pub trait Source<T> {
    fn read(&self) -> T;
}

/// Write side of a bound value
pub trait Sink<T> {
    fn write(&mut self, value: T);
}

impl<T, F> Source<T> for F
where
    F: Fn() -> T,
{
    fn read(&self) -> T {
        self()
    }
}

impl<T, F> Sink<T> for F
where
    F: FnMut(T),
{
    fn write(&mut self, value: T) {
        self(value)
    }
}

/// Device store behind the panel
///
/// Axis reads return snapshots; unknown axes read as the default state.
pub trait AxisStore {
    fn axis(&self, name: &str) -> AxisState;
    fn set_target(&mut self, name: &str, raw: f64);
    fn set_increment(&mut self, name: &str, increment: f64);
    fn stop(&mut self, name: &str);
    fn home(&mut self, name: &str);
    fn set_connected(&mut self, name: &str, connected: bool);

    fn services(&self) -> Vec<ServiceState>;
    fn connect_service(&mut self, index: usize);
    fn disconnect_service(&mut self, index: usize);
    /// Re-check an HTTP service
    fn check_service(&mut self, index: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_twice(source: &impl Source<i32>) -> i32 {
        source.read() + source.read()
    }

    fn write_all(sink: &mut impl Sink<f64>, values: &[f64]) {
        for v in values {
            sink.write(*v);
        }
    }

    #[test]
    fn test_closures_are_sources_and_sinks() {
        let value = 21;
        assert_eq!(read_twice(&|| value), 42);

        let mut written = Vec::new();
        write_all(&mut |v: f64| written.push(v), &[1.0, 2.5]);
        assert_eq!(written, vec![1.0, 2.5]);
    }
}
