//! Impossible Colors - a touch-driven two-disc color toy
//!
//! Core modules:
//! - `scene`: Deterministic disc layout and overlap-lens geometry
//! - `gesture`: Pointer contact tracking (spread and drag policies)
//! - `scheme`: Color schemes, built-in and file-loaded
//! - `settings`: Persisted scheme selection and disc offset
//! - `toy`: Application state and menu command dispatch
//! - `renderer`: WebGPU rendering pipeline
//! - `resources`: Static text and scheme-file loading

pub mod color;
pub mod gesture;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod scheme;
pub mod settings;
pub mod toy;

pub use scheme::{ColorScheme, SchemeLibrary};
pub use settings::Settings;
pub use toy::{ColorToy, MenuAction, Profile};

/// Toy configuration constants
pub mod consts {
    /// Disc radius as a fraction of viewport width, spread profile
    pub const SPREAD_RADIUS_RATIO: f32 = 0.05;
    /// Disc radius as a fraction of viewport width, drag profile
    pub const DRAG_RADIUS_RATIO: f32 = 0.25;

    /// Triangle-fan resolution for disc tessellation
    pub const CIRCLE_SEGMENTS: u32 = 64;

    /// Scheme selected when the settings store has nothing better
    pub const DEFAULT_SCHEME_ID: &str = "yb";
}
