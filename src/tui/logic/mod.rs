pub mod navigation;

pub use navigation::{clamp_selection, navigate_down, navigate_up};
