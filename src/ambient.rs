//! Decorative background coordinates written into CSS custom properties.

use std::f64::consts::TAU;

use serde_json::json;

use crate::logging::{log_event, LogLevel};

pub const MOUSE_X: &str = "--mouse-x";
pub const MOUSE_Y: &str = "--mouse-y";

#[derive(Clone, Copy, Debug, PartialEq)]
struct Orbit {
    x_var: &'static str,
    y_var: &'static str,
    center: (f64, f64),
    radius: (f64, f64),
    period_s: (f64, f64),
    phase: f64,
}

const ORBITS: [Orbit; 3] = [
    Orbit {
        x_var: "--p1-x",
        y_var: "--p1-y",
        center: (25.0, 30.0),
        radius: (15.0, 10.0),
        period_s: (20.0, 26.0),
        phase: 0.0,
    },
    Orbit {
        x_var: "--p2-x",
        y_var: "--p2-y",
        center: (70.0, 60.0),
        radius: (20.0, 15.0),
        period_s: (28.0, 18.0),
        phase: 2.1,
    },
    Orbit {
        x_var: "--p3-x",
        y_var: "--p3-y",
        center: (50.0, 80.0),
        radius: (25.0, 12.0),
        period_s: (34.0, 22.0),
        phase: 4.2,
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Channel {
    pub name: &'static str,
    pub percent: f64,
}

impl Channel {
    pub fn css_value(&self) -> String {
        format!("{:.2}%", self.percent)
    }
}

/// Slow oscillators for the three background particles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AmbientField;

impl AmbientField {
    pub fn sample(&self, t_seconds: f64) -> Vec<Channel> {
        ORBITS
            .iter()
            .flat_map(|orbit| {
                let x = orbit.center.0
                    + orbit.radius.0 * (TAU * t_seconds / orbit.period_s.0 + orbit.phase).sin();
                let y = orbit.center.1
                    + orbit.radius.1 * (TAU * t_seconds / orbit.period_s.1 + orbit.phase).cos();
                [
                    Channel {
                        name: orbit.x_var,
                        percent: x.clamp(0.0, 100.0),
                    },
                    Channel {
                        name: orbit.y_var,
                        percent: y.clamp(0.0, 100.0),
                    },
                ]
            })
            .collect()
    }

    /// Converts a client-space pointer position into viewport percentages.
    pub fn pointer(&self, client_x: f64, client_y: f64, viewport: (f64, f64)) -> [Channel; 2] {
        let percent = |value: f64, extent: f64| {
            if extent <= 0.0 {
                50.0
            } else {
                (value / extent * 100.0).clamp(0.0, 100.0)
            }
        };

        [
            Channel {
                name: MOUSE_X,
                percent: percent(client_x, viewport.0),
            },
            Channel {
                name: MOUSE_Y,
                percent: percent(client_y, viewport.1),
            },
        ]
    }
}

/// Host the ambient effect attaches to. Dropping a returned handle detaches it.
pub trait AmbientSink {
    type Frames;
    type Pointer;

    fn animate(&mut self, field: AmbientField) -> Self::Frames;
    fn follow_pointer(&mut self, field: AmbientField) -> Option<Self::Pointer>;
}

/// Owns the frame loop and the pointer listener; they start and stop together.
pub struct AmbientDriver<S: AmbientSink> {
    sink: S,
    running: Option<(S::Frames, Option<S::Pointer>)>,
}

impl<S: AmbientSink> AmbientDriver<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Returns false when already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        let field = AmbientField;
        let frames = self.sink.animate(field);
        let pointer = self.sink.follow_pointer(field);
        log_event(
            LogLevel::Debug,
            "ambient.started",
            json!({ "pointer": pointer.is_some() }),
        );
        self.running = Some((frames, pointer));
        true
    }

    /// Returns false when nothing was running.
    pub fn stop(&mut self) -> bool {
        let Some(handles) = self.running.take() else {
            return false;
        };

        drop(handles);
        log_event(LogLevel::Debug, "ambient.stopped", json!({}));
        true
    }
}

impl<S: AmbientSink> Drop for AmbientDriver<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
