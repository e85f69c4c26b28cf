//! Display pipeline: mode → message → glyph frames.
//!
//! ```text
//!   DisplayMode ──compose()──▶ DisplayMessage ──render()──▶ [GlyphFrame] ──▶ FrameSink
//! ```
//!
//! Pure functions only; pacing and bus writes live in the display task.

pub mod font;
pub mod message;
pub mod mode;
pub mod render;

pub use font::encode_char;
pub use message::{DisplayMessage, MAX_MESSAGE_CHARS};
pub use mode::{DisplayMode, compose};
pub use render::{BLANK_FRAME, GlyphFrame, Rendered, VISIBLE_WIDTH, render, render_message};
