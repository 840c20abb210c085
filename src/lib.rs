pub mod checkpoint;
pub mod cues;
pub mod gauge;
pub mod host;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;

pub mod settings;
pub mod debug;
