//! Audio file decoding into mono waveforms.

mod decode;
mod mixdown;

pub use decode::{load_audio, LoadOptions};
pub use mixdown::downmix;
