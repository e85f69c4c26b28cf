//! Leader identities over real UDP sockets, and election results feeding
//! the coordinator.

use std::net::UdpSocket;
use std::sync::Arc;
use std::time::{Duration, Instant};

use catcollar::adapters::udp::IdentityListener;
use catcollar::app::SharedState;
use catcollar::app::events::AppEvent;
use catcollar::drivers::delay::NoopDelay;
use catcollar::drivers::task_pin::spawn_on_core;
use catcollar::leader::{ActivityTally, LEADER_KEYWORD, LeaderAction, PulseReason};
use catcollar::tasks;

use crate::mock_hw::{CountingAlert, RecordingSink};

fn wait_for(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
    let end = Instant::now() + deadline;
    while Instant::now() < end {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    done()
}

#[test]
fn duplicate_identity_over_udp_pulses_once() {
    let listener = IdentityListener::bind(0).unwrap();
    let port = listener.local_port().unwrap();
    let state = Arc::new(SharedState::new("1", 0));
    let alert = CountingAlert::default();
    let events = RecordingSink::default();

    let handle = {
        let (state, alert, events) = (Arc::clone(&state), alert.clone(), events.clone());
        spawn_on_core(tasks::LISTENER_TASK, move || {
            tasks::network::run_identity_listener(&state, listener, alert, events, NoopDelay);
        })
        .unwrap()
    };

    let tx = UdpSocket::bind("127.0.0.1:0").unwrap();
    for (handled, token) in ["2", "2", "3"].into_iter().enumerate() {
        tx.send_to(token.as_bytes(), ("127.0.0.1", port)).unwrap();
        // Every message ends in exactly one pulse or one silence.
        assert!(wait_for(Duration::from_secs(2), || {
            alert.pulses() + alert.silences() == handled + 1
        }));
    }

    state.request_shutdown();
    handle.join().unwrap();

    assert_eq!(alert.pulses(), 2);
    assert_eq!(state.snapshot(0).leader.as_deref(), Some("3"));
    let pulses: Vec<_> = events
        .events()
        .into_iter()
        .filter(|e| matches!(e, AppEvent::AlertPulsed(_)))
        .collect();
    assert_eq!(pulses, vec![AppEvent::AlertPulsed(PulseReason::LeaderChanged); 2]);
}

#[test]
fn keyword_datagram_designates_this_node() {
    let listener = IdentityListener::bind(0).unwrap();
    let port = listener.local_port().unwrap();
    let state = Arc::new(SharedState::new("1", 0));
    let alert = CountingAlert::default();

    let handle = {
        let (state, alert) = (Arc::clone(&state), alert.clone());
        spawn_on_core(tasks::LISTENER_TASK, move || {
            tasks::network::run_identity_listener(
                &state,
                listener,
                alert,
                RecordingSink::default(),
                NoopDelay,
            );
        })
        .unwrap()
    };

    let tx = UdpSocket::bind("127.0.0.1:0").unwrap();
    tx.send_to(format!("{LEADER_KEYWORD}\0").as_bytes(), ("127.0.0.1", port))
        .unwrap();
    assert!(wait_for(Duration::from_secs(2), || alert.pulses() == 1));
    assert!(state.is_leader());

    state.request_shutdown();
    handle.join().unwrap();
    assert_eq!(state.snapshot(0).leader, None);
}

#[test]
fn election_winner_becomes_the_followed_leader() {
    let mut tally = ActivityTally::new();
    for (id, port) in [("1", 3333), ("2", 3334), ("3", 3335)] {
        tally.register(id, port);
    }
    let log = "\
Port 3333 | ID a | Message: 00:01:00, Cat state: Wander Time
Port 3334 | ID b | Message: 00:05:00, Cat state: Sleepy Time
Port 3335 | ID c | Message: 02:00, Cat state: Moonwalk Time
Port 3334 | ID b | Message: 30, Cat state: Wander Time
";
    for line in log.lines() {
        tally.record_log_line(line);
    }
    assert_eq!(tally.leader(), Some("3"));

    // Collar 3 hears its own id: it leads and buzzes on every broadcast.
    let state = SharedState::new("3", 0);
    let mut alert = CountingAlert::default();
    let mut sink = RecordingSink::default();
    let winner = tally.leader().unwrap();
    for _ in 0..3 {
        let update = state.on_identity(winner, &mut alert, &mut sink);
        assert_eq!(update.action, LeaderAction::Pulse(PulseReason::Designated));
    }
    assert_eq!(alert.pulses(), 3);
    assert!(sink.events().contains(&AppEvent::LeaderDesignated(true)));
}
