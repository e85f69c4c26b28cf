//! Smart Cat Collar Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters / drivers (outer ring)           │
//! │                                                              │
//! │  Adxl343        Ht16k33        Buzzer       ModeButton pin   │
//! │  (Accelerometer)(FrameSink)    (AlertPort)  (InputPin)       │
//! │  UdpStatusReporter  IdentityListener  LogEventSink  Clock    │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  sampler ─┐                                                  │
//! │  display ─┼──▶ SharedState (one lock) ◀── listener           │
//! │  input  ──┘                                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::gpio::{AnyInputPin, AnyOutputPin, PinDriver, Pull};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use catcollar::adapters::log_sink::LogEventSink;
use catcollar::adapters::time::Esp32Clock;
use catcollar::adapters::udp::{IdentityListener, UdpStatusReporter};
use catcollar::adapters::wifi;
use catcollar::app::SharedState;
use catcollar::app::events::AppEvent;
use catcollar::app::ports::{Clock, EventSink};
use catcollar::config::SystemConfig;
use catcollar::drivers::adxl343::{Adxl343, Range};
use catcollar::drivers::buzzer::Buzzer;
use catcollar::drivers::delay::ThreadDelay;
use catcollar::drivers::ht16k33::Ht16k33;
use catcollar::drivers::i2c_bus::{SharedBus, scan_bus};
use catcollar::drivers::task_pin::spawn_on_core;
use catcollar::motion::MotionState;
use catcollar::{pins, tasks};

fn load_config() -> SystemConfig {
    match option_env!("CATCOLLAR_CONFIG_JSON") {
        Some(json) => SystemConfig::from_json(json).unwrap_or_else(|e| {
            warn!("Config override rejected ({}), using defaults", e);
            SystemConfig::default()
        }),
        None => SystemConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("CatCollar v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(load_config());
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 2. I2C bus + peripherals ──────────────────────────────
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio23,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    let mut bus = SharedBus::new(i2c);
    scan_bus(&mut bus);

    let mut accel = Adxl343::new(bus.clone());
    if accel.probe() {
        let range = Range::from_g(config.accel_range_g).unwrap_or(Range::G2);
        if let Err(e) = accel.init().and_then(|()| accel.set_range(range)) {
            warn!("ADXL343 setup failed ({}), readings may be invalid", e);
        }
    } else {
        warn!("No ADXL343 detected, motion classification degraded");
    }

    let mut display = Ht16k33::new(bus.clone());
    if let Err(e) = display.init(config.brightness, &mut ThreadDelay) {
        warn!("HT16K33 init failed ({}), display degraded", e);
    }

    // SAFETY: pin numbers come from `pins` and are not claimed elsewhere.
    let mut button = PinDriver::input(unsafe { AnyInputPin::new(pins::BUTTON_GPIO) })?;
    button.set_pull(Pull::Up)?;
    let buzzer_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::BUZZER_GPIO) })?;
    let buzzer = Buzzer::new(buzzer_pin, ThreadDelay, config.buzz_on_ms, config.buzz_off_ms);

    // ── 3. Network (optional) ─────────────────────────────────
    let _wifi = match wifi::connect(peripherals.modem, sysloop, nvs, &config) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!("WiFi unavailable ({}), running offline", e);
            None
        }
    };
    let reporter = UdpStatusReporter::new(&config.status_host, config.status_port)
        .map_err(|e| warn!("Status reporter disabled: {}", e))
        .ok();

    // ── 4. Shared state + workers ─────────────────────────────
    let clock = Esp32Clock::new();
    let state = Arc::new(SharedState::new(&config.node_id, clock.now_us()));
    LogEventSink.emit(&AppEvent::Started {
        node_id: config.node_id.clone(),
        state: MotionState::default(),
    });

    let mut handles = Vec::new();
    {
        let (state, config) = (Arc::clone(&state), Arc::clone(&config));
        handles.push(spawn_on_core(tasks::SAMPLER_TASK, move || {
            tasks::sampler::run_sampler(
                &state,
                accel,
                ThreadDelay,
                Esp32Clock::new(),
                (LogEventSink, reporter),
                &config,
            );
        })?);
    }
    {
        let (state, config) = (Arc::clone(&state), Arc::clone(&config));
        handles.push(spawn_on_core(tasks::DISPLAY_TASK, move || {
            tasks::display::run_display(&state, display, ThreadDelay, Esp32Clock::new(), &config);
        })?);
    }
    {
        let (state, poll_ms) = (Arc::clone(&state), config.button_poll_ms);
        handles.push(spawn_on_core(tasks::INPUT_TASK, move || {
            tasks::input::run_mode_button(&state, button, ThreadDelay, LogEventSink, poll_ms);
        })?);
    }
    match IdentityListener::bind(config.identity_port) {
        Ok(listener) => {
            info!("Listening for leader identities on port {}", config.identity_port);
            let state = Arc::clone(&state);
            handles.push(spawn_on_core(tasks::LISTENER_TASK, move || {
                tasks::network::run_identity_listener(
                    &state,
                    listener,
                    buzzer,
                    LogEventSink,
                    ThreadDelay,
                );
            })?);
        }
        Err(e) => warn!("Identity listener disabled: {}", e),
    }

    for handle in handles {
        if handle.join().is_err() {
            warn!("Worker thread panicked");
        }
    }
    Ok(())
}
