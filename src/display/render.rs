//! Text to glyph frames, with the scroll schedule for long messages.
//!
//! Messages that fit the 4-cell window become one right-padded frame.
//! Longer messages are laid out behind four leading blanks and walked one
//! cell at a time:
//!
//! ```text
//!   "Sleepy Time"  →  [____Sleepy Time]
//!                      ^^^^              frame 0 (all blank)
//!                       ^^^^             frame 1 ("___S")
//!                                 ^^^^   frame 11 ("Time")
//! ```
//!
//! After the last frame of a scroll the consumer writes [`BLANK_FRAME`].

use heapless::Vec;

use super::font::{BLANK, encode_char};
use super::message::{DisplayMessage, MAX_MESSAGE_CHARS};

/// Cells on the display.
pub const VISIBLE_WIDTH: usize = 4;

/// One display refresh: a glyph per cell, left to right.
pub type GlyphFrame = [u16; VISIBLE_WIDTH];

pub const BLANK_FRAME: GlyphFrame = [BLANK; VISIBLE_WIDTH];

/// Most frames any message can produce (16 chars scrolled).
pub const MAX_FRAMES: usize = MAX_MESSAGE_CHARS + 1;

/// Frame plan for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    frames: Vec<GlyphFrame, MAX_FRAMES>,
    scrolls: bool,
}

impl Rendered {
    pub fn frames(&self) -> &[GlyphFrame] {
        &self.frames
    }

    /// True when the frames must be paced and followed by a blank frame.
    pub fn scrolls(&self) -> bool {
        self.scrolls
    }

    /// What the display shows once the whole plan has been written.
    pub fn final_frame(&self) -> GlyphFrame {
        if self.scrolls {
            BLANK_FRAME
        } else {
            self.frames.first().copied().unwrap_or(BLANK_FRAME)
        }
    }
}

/// Render `text`, truncating to 16 characters first.
pub fn render(text: &str) -> Rendered {
    render_message(&DisplayMessage::new(text))
}

pub fn render_message(message: &DisplayMessage) -> Rendered {
    let mut frames = Vec::new();
    let len = message.len();

    if len <= VISIBLE_WIDTH {
        let mut frame = BLANK_FRAME;
        for (cell, c) in frame.iter_mut().zip(message.as_str().chars()) {
            *cell = encode_char(c);
        }
        // Capacity is at least one frame.
        let _ = frames.push(frame);
        return Rendered {
            frames,
            scrolls: false,
        };
    }

    let mut buffer: Vec<u16, { MAX_MESSAGE_CHARS + VISIBLE_WIDTH }> = Vec::new();
    for _ in 0..VISIBLE_WIDTH {
        let _ = buffer.push(BLANK);
    }
    for c in message.as_str().chars() {
        let _ = buffer.push(encode_char(c));
    }

    for window in buffer.windows(VISIBLE_WIDTH) {
        let mut frame = BLANK_FRAME;
        frame.copy_from_slice(window);
        let _ = frames.push(frame);
    }

    Rendered {
        frames,
        scrolls: true,
    }
}
