mod generate;

#[allow(unused_imports)]
pub use generate::{constant_frames, sine_frames, tone_with_offset};
