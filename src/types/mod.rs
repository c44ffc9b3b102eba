//! Core colour types for retint.
//!
//! - `Colour` - RGB values parsed from and formatted as hex
//! - `Hls` - hue/lightness/saturation representation
//! - `ColourSpec` - a colour with its HLS form and lightness offsets

mod colour;
mod hls;

pub use colour::Colour;
pub use hls::{ColourSpec, Hls};
