pub mod renderer;

pub use renderer::{Glyphs, Renderer};
