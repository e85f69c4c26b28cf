//! Property tests for the classifier, renderer and identity parser.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use catcollar::display::{BLANK_FRAME, VISIBLE_WIDTH, encode_char, render};
use catcollar::leader::{LeaderCoordinator, MAX_IDENTITY_LEN, parse_identity};
use catcollar::motion::{MotionState, classify};
use catcollar::status::{format_elapsed, parse_status_line, status_line};
use proptest::prelude::*;

// ── Classifier rules ──────────────────────────────────────────

proptest! {
    #[test]
    fn resting_axes_always_sleep(
        roll in -180.0f32..180.0,
        pitch in -180.0f32..180.0,
        x in -1.999f32..1.999,
        y in -1.999f32..1.999,
        z in -10.999f32..10.999,
    ) {
        prop_assert_eq!(classify(roll, pitch, x, y, z), MotionState::Sleep);
    }

    #[test]
    fn lateral_motion_below_seventy_degrees_wanders(
        roll in -180.0f32..180.0,
        pitch in -69.999f32..69.999,
        x in 2.001f32..40.0,
        y in -40.0f32..40.0,
        z in -40.0f32..40.0,
        negate in any::<bool>(),
    ) {
        let x = if negate { -x } else { x };
        prop_assert_eq!(classify(roll, pitch, x, y, z), MotionState::Wander);
    }

    #[test]
    fn steep_pitch_moonwalks_unless_resting(
        pitch in 70.0f32..180.0,
        negate in any::<bool>(),
        x in -40.0f32..40.0,
        y in -40.0f32..40.0,
        z in 11.0f32..40.0,
    ) {
        let pitch = if negate { -pitch } else { pitch };
        prop_assert_eq!(classify(0.0, pitch, x, y, z), MotionState::Moonwalk);
    }
}

// ── Renderer ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn frame_count_follows_message_length(text in "[ -~]{0,24}") {
        let r = render(&text);
        let len = text.chars().count().min(16);
        if len <= VISIBLE_WIDTH {
            prop_assert_eq!(r.frames().len(), 1);
            prop_assert!(!r.scrolls());
        } else {
            prop_assert_eq!(r.frames().len(), len + 1);
            prop_assert_eq!(r.frames()[0], BLANK_FRAME);
            prop_assert_eq!(r.final_frame(), BLANK_FRAME);
        }
    }

    #[test]
    fn every_cell_shows_its_character(text in "[ -~]{5,16}") {
        let r = render(&text);
        let chars: Vec<char> = text.chars().collect();
        for (offset, frame) in r.frames().iter().enumerate() {
            for (cell, glyph) in frame.iter().enumerate() {
                let pos = (offset + cell).checked_sub(VISIBLE_WIDTH);
                let expected = pos.map_or(0, |p| encode_char(chars[p]));
                prop_assert_eq!(*glyph, expected);
            }
        }
    }

    #[test]
    fn render_never_panics(text in any::<String>()) {
        let r = render(&text);
        prop_assert!(!r.frames().is_empty());
        prop_assert!(r.frames().len() <= 17);
    }

    #[test]
    fn long_input_renders_as_its_prefix(text in "[ -~]{17,40}") {
        let prefix: String = text.chars().take(16).collect();
        prop_assert_eq!(render(&text), render(&prefix));
    }
}

// ── Status lines ──────────────────────────────────────────────

proptest! {
    #[test]
    fn status_line_parses_back_within_a_day(secs in 0u64..86_400, pick in 0usize..3) {
        let state = [MotionState::Sleep, MotionState::Wander, MotionState::Moonwalk][pick];
        let report = parse_status_line(&status_line(secs, state)).unwrap();
        prop_assert_eq!(report.elapsed_secs, secs);
        prop_assert_eq!(report.state, state);
    }

    #[test]
    fn elapsed_is_always_eight_chars(secs in any::<u64>()) {
        prop_assert_eq!(format_elapsed(secs).len(), 8);
    }
}

// ── Leader identities ─────────────────────────────────────────

proptest! {
    #[test]
    fn parsed_identities_are_bounded_and_trimmed(payload in proptest::collection::vec(any::<u8>(), 0..200)) {
        if let Some(id) = parse_identity(&payload) {
            prop_assert!(!id.is_empty());
            prop_assert!(id.len() <= MAX_IDENTITY_LEN);
            prop_assert_eq!(id.trim_matches(|c: char| c.is_whitespace() || c == '\0'), id.as_str());
        }
    }

    /// Pulses for a follower equal the number of identity changes.
    #[test]
    fn follower_pulses_once_per_change(tokens in proptest::collection::vec("[2-5]", 1..30)) {
        let mut c = LeaderCoordinator::new("1");
        let mut pulses = 0;
        let mut changes = 0;
        let mut last: Option<String> = None;
        for t in &tokens {
            if c.on_identity(t).pulses() {
                pulses += 1;
            }
            if last.as_deref() != Some(t.as_str()) {
                changes += 1;
                last = Some(t.clone());
            }
        }
        prop_assert_eq!(pulses, changes);
    }
}
