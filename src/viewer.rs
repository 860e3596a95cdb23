use std::ops::{Add, Sub};

use serde::Deserialize;
use serde_json::json;

use crate::logging::{log_event, LogLevel};

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;
pub const BUTTON_ZOOM_STEP: f64 = 0.25;
pub const WHEEL_ZOOM_STEP: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ViewerAsset {
    pub src: String,
    pub title: String,
    pub filename: String,
    #[serde(default)]
    pub download_href: Option<String>,
}

impl ViewerAsset {
    pub fn new(src: &str, title: &str, filename: &str) -> Self {
        Self {
            src: src.to_owned(),
            title: title.to_owned(),
            filename: filename.to_owned(),
            download_href: None,
        }
    }

    /// The saved file defaults to the displayed image when no separate document exists.
    pub fn download_href(&self) -> &str {
        self.download_href.as_deref().unwrap_or(&self.src)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other,
}

impl PointerButton {
    /// Maps the DOM `MouseEvent.button` code.
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerCommand {
    Close,
    ZoomIn,
    ZoomOut,
    Reset,
}

impl ViewerCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Close),
            "+" | "=" => Some(Self::ZoomIn),
            "-" => Some(Self::ZoomOut),
            "r" | "R" => Some(Self::Reset),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    pub href: String,
    pub filename: String,
}

impl From<&ViewerAsset> for DownloadRequest {
    fn from(asset: &ViewerAsset) -> Self {
        Self {
            href: asset.download_href().to_owned(),
            filename: asset.filename.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    asset: ViewerAsset,
    open: bool,
    scale: f64,
    offset: Point,
    drag_anchor: Option<Point>,
}

fn clamp_scale(value: f64) -> f64 {
    ((value * 100.0).round() / 100.0).clamp(MIN_SCALE, MAX_SCALE)
}

impl ViewerState {
    pub fn new(asset: ViewerAsset) -> Self {
        Self {
            asset,
            open: false,
            scale: 1.0,
            offset: Point::ORIGIN,
            drag_anchor: None,
        }
    }

    pub fn asset(&self) -> &ViewerAsset {
        &self.asset
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Opening always starts from the identity transform.
    pub fn open(&mut self) {
        if self.open {
            return;
        }

        self.open = true;
        self.reset_view();
        self.drag_anchor = None;
        log_event(
            LogLevel::Info,
            "viewer.opened",
            json!({ "asset": self.asset.title }),
        );
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }

        self.open = false;
        self.drag_anchor = None;
        log_event(
            LogLevel::Info,
            "viewer.closed",
            json!({ "asset": self.asset.title, "scale": self.scale }),
        );
    }

    pub fn zoom_in(&mut self) {
        self.scale = clamp_scale(self.scale + BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.scale = clamp_scale(self.scale - BUTTON_ZOOM_STEP);
    }

    /// Negative deltas (wheel pushed away from the user) zoom in.
    pub fn wheel_zoom(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.scale = clamp_scale(self.scale + WHEEL_ZOOM_STEP);
        } else if delta_y > 0.0 {
            self.scale = clamp_scale(self.scale - WHEEL_ZOOM_STEP);
        }
    }

    pub fn reset_view(&mut self) {
        self.scale = 1.0;
        self.offset = Point::ORIGIN;
    }

    pub fn begin_drag(&mut self, pointer: Point, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }

        self.drag_anchor = Some(pointer - self.offset);
    }

    pub fn continue_drag(&mut self, pointer: Point) {
        if let Some(anchor) = self.drag_anchor {
            self.offset = pointer - anchor;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Applies a keyboard shortcut. Returns false when the key was not handled,
    /// which is always the case while the viewer is closed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.open {
            return false;
        }

        let Some(command) = ViewerCommand::from_key(key) else {
            return false;
        };

        self.apply(command);
        true
    }

    pub fn apply(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::Close => self.close(),
            ViewerCommand::ZoomIn => self.zoom_in(),
            ViewerCommand::ZoomOut => self.zoom_out(),
            ViewerCommand::Reset => self.reset_view(),
        }
    }

    pub fn download_request(&self) -> DownloadRequest {
        DownloadRequest::from(&self.asset)
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn position_readout(&self) -> (i64, i64) {
        (self.offset.x.round() as i64, self.offset.y.round() as i64)
    }

    pub fn transform_css(&self) -> String {
        format!(
            "transform: translate({:.1}px, {:.1}px) scale({:.2});",
            self.offset.x, self.offset.y, self.scale
        )
    }
}
