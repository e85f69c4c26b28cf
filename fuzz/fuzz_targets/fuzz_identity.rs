//! Fuzz target: identity datagrams → `LeaderCoordinator`
//!
//! Splits the input on `\n` into datagrams and feeds each through
//! `parse_identity` and the coordinator.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Parsed identities are non-empty and at most 40 bytes
//! - A follower never pulses on an unchanged identity
//!
//! cargo fuzz run fuzz_identity

#![no_main]

use catcollar::leader::{LeaderAction, LeaderCoordinator, MAX_IDENTITY_LEN, parse_identity};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut c = LeaderCoordinator::new("node");
    for datagram in data.split(|b| *b == b'\n') {
        let Some(id) = parse_identity(datagram) else {
            continue;
        };
        assert!(!id.is_empty() && id.len() <= MAX_IDENTITY_LEN);

        let before = c.current().map(str::to_owned);
        let was_leader = c.is_leader();
        let update = c.on_identity(&id);
        if !was_leader && !c.is_leader() && before.as_deref() == Some(id.as_str()) {
            assert_eq!(update.action, LeaderAction::Silence);
        }
    }
});
