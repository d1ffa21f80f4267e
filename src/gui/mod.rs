pub mod app;
pub mod message_overlay;
pub mod theme;

pub use app::HeartCheckApp;
