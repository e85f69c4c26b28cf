//! Sampling → classification → status, and state → display, end to end
//! through the real drivers on a simulated I2C bus.

use std::net::UdpSocket;
use std::sync::Arc;
use std::time::Duration;

use catcollar::adapters::log_sink::LogEventSink;
use catcollar::adapters::udp::UdpStatusReporter;
use catcollar::app::SharedState;
use catcollar::app::events::AppEvent;
use catcollar::config::SystemConfig;
use catcollar::display::{DisplayMode, encode_char, render};
use catcollar::drivers::adxl343::{ADXL343_ADDR, Adxl343, DEVICE_ID, Range};
use catcollar::drivers::delay::{NoopDelay, ThreadDelay};
use catcollar::drivers::ht16k33::{HT16K33_ADDR, Ht16k33, frame_bytes};
use catcollar::drivers::i2c_bus::{SharedBus, scan_bus};
use catcollar::drivers::task_pin::spawn_on_core;
use catcollar::motion::MotionState;
use catcollar::tasks;

use crate::mock_hw::{MockClock, RecordingSink, ScriptedPin, SimBus, set_adxl_raw};

/// Bus with both collar peripherals attached; the accelerometer reads
/// -1 g on X (nose down).
fn collar_bus() -> SharedBus<SimBus> {
    let mut sim = SimBus::new();
    let accel = sim.attach(ADXL343_ADDR);
    accel[0x00] = DEVICE_ID;
    set_adxl_raw(accel, -250, 0, 0);
    sim.attach(HT16K33_ADDR);
    SharedBus::new(sim)
}

#[test]
fn scan_finds_both_peripherals() {
    let mut bus = collar_bus();
    assert_eq!(scan_bus(&mut bus).as_slice(), &[ADXL343_ADDR, HT16K33_ADDR]);
}

#[test]
fn nose_down_collar_reports_moonwalk() {
    let bus = collar_bus();
    let mut accel = Adxl343::new(bus.clone());
    assert!(accel.probe());
    accel.init().unwrap();
    accel.set_range(Range::G2).unwrap();
    assert_eq!(bus.lock().registers(ADXL343_ADDR).unwrap()[0x31], 0x08);

    let state = SharedState::new("3", 0);
    let clock = MockClock::default();
    clock.set_us(7_000_000);
    let sink = RecordingSink::default();

    let got = tasks::sampler::sample_once(
        &state,
        &mut accel,
        &mut NoopDelay,
        &clock,
        &mut sink.clone(),
        &SystemConfig::default(),
    );
    assert_eq!(got, Some(MotionState::Moonwalk));
    assert_eq!(
        sink.events(),
        vec![AppEvent::MotionChanged {
            from: MotionState::Sleep,
            to: MotionState::Moonwalk,
            elapsed_secs: 7,
        }]
    );

    // Same reading again: no second notification, no timer reset.
    clock.set_us(9_000_000);
    tasks::sampler::sample_once(
        &state,
        &mut accel,
        &mut NoopDelay,
        &clock,
        &mut sink.clone(),
        &SystemConfig::default(),
    );
    assert_eq!(sink.events().len(), 1);
    assert_eq!(state.snapshot(9_000_000).since_us, 7_000_000);
}

#[test]
fn transition_sends_status_datagram() {
    let rx = UdpSocket::bind("127.0.0.1:0").unwrap();
    rx.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    let port = rx.local_addr().unwrap().port();

    let reporter = UdpStatusReporter::new("127.0.0.1", port).unwrap();
    let mut sink = (LogEventSink::new(), Some(reporter));
    let state = SharedState::new("3", 0);
    let clock = MockClock::default();
    clock.set_us(3_725_400_000);

    assert!(state.apply_motion(MotionState::Wander, &clock, &mut sink));

    let mut buf = [0u8; 128];
    let (len, _) = rx.recv_from(&mut buf).unwrap();
    assert_eq!(
        std::str::from_utf8(&buf[..len]).unwrap(),
        "01:02:05, Cat state: Wander Time\n"
    );
}

#[test]
fn state_mode_scrolls_label_onto_backpack() {
    let mut sim = SimBus::new();
    sim.attach(HT16K33_ADDR);
    let mut display = Ht16k33::new(sim);

    let state = SharedState::new("3", 0);
    let mut events = RecordingSink::default();
    assert_eq!(state.cycle_display_mode(&mut events), DisplayMode::State);

    tasks::display::refresh_once(
        &state,
        &mut display,
        &mut NoopDelay,
        &MockClock::default(),
        &SystemConfig::default(),
    )
    .unwrap();

    let writes = display.release().writes_to(HT16K33_ADDR);
    let plan = render("Sleepy Time");
    assert_eq!(writes.len(), 13);
    for (written, frame) in writes.iter().zip(plan.frames()) {
        assert_eq!(written.as_slice(), frame_bytes(frame).as_slice());
    }
    assert_eq!(writes[0], vec![0u8; 9]);
    let slee = [encode_char('S'), encode_char('l'), encode_char('e'), encode_char('e')];
    assert_eq!(writes[4], frame_bytes(&slee).to_vec());
    assert_eq!(writes[12], vec![0u8; 9]);
}

#[test]
fn workers_share_state_and_stop_on_shutdown() {
    let bus = collar_bus();
    let config = Arc::new(SystemConfig {
        sample_interval_ms: 1,
        scroll_frame_ms: 1,
        display_refresh_ms: 1,
        button_poll_ms: 1,
        ..SystemConfig::default()
    });
    let state = Arc::new(SharedState::new("3", 0));
    let events = RecordingSink::default();

    let mut accel = Adxl343::new(bus.clone());
    accel.init().unwrap();
    let display = Ht16k33::new(bus.clone());

    let mut handles = Vec::new();
    {
        let (state, config, sink) = (Arc::clone(&state), Arc::clone(&config), events.clone());
        handles.push(
            spawn_on_core(tasks::SAMPLER_TASK, move || {
                tasks::sampler::run_sampler(&state, accel, ThreadDelay, MockClock::default(), sink, &config);
            })
            .unwrap(),
        );
    }
    {
        let (state, config) = (Arc::clone(&state), Arc::clone(&config));
        handles.push(
            spawn_on_core(tasks::DISPLAY_TASK, move || {
                tasks::display::run_display(&state, display, ThreadDelay, MockClock::default(), &config);
            })
            .unwrap(),
        );
    }
    {
        let (state, sink) = (Arc::clone(&state), events.clone());
        handles.push(
            spawn_on_core(tasks::INPUT_TASK, move || {
                let pin = ScriptedPin(vec![true, false]);
                tasks::input::run_mode_button(&state, pin, ThreadDelay, sink, 1);
            })
            .unwrap(),
        );
    }

    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while state.motion() != MotionState::Moonwalk && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    std::thread::sleep(Duration::from_millis(50));
    state.request_shutdown();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(state.motion(), MotionState::Moonwalk);
    assert_eq!(state.display_mode(), DisplayMode::State);
    assert!(events.events().contains(&AppEvent::DisplayModeChanged(DisplayMode::State)));
    assert!(!bus.lock().writes_to(HT16K33_ADDR).is_empty());
}
