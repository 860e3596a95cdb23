pub mod ambient;
pub mod animation;
pub mod chat;
pub mod config;
pub mod contact;
pub mod content;
pub mod logging;
pub mod navigation;
pub mod reveal;
pub mod sections;
pub mod theme;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
