//! Fuzz target: `render` (text → glyph frames)
//!
//! Invariants checked:
//! - No panics for any UTF-8 input
//! - Between 1 and 17 frames, every frame exactly 4 cells
//! - Scrolling plans start blank and end on a blank display
//!
//! cargo fuzz run fuzz_render

#![no_main]

use catcollar::display::{BLANK_FRAME, render};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let r = render(&text);

    assert!(!r.frames().is_empty() && r.frames().len() <= 17);
    if r.scrolls() {
        assert_eq!(r.frames()[0], BLANK_FRAME);
        assert_eq!(r.final_frame(), BLANK_FRAME);
    } else {
        assert_eq!(r.frames().len(), 1);
    }
});
