//! Piezo buzzer on a push-pull GPIO.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::AlertPort;

pub struct Buzzer<P, D> {
    pin: P,
    delay: D,
    on_ms: u32,
    off_ms: u32,
}

impl<P: OutputPin, D: DelayNs> Buzzer<P, D> {
    pub fn new(pin: P, delay: D, on_ms: u32, off_ms: u32) -> Self {
        let mut buzzer = Self {
            pin,
            delay,
            on_ms,
            off_ms,
        };
        buzzer.set(false);
        buzzer
    }

    pub fn release(self) -> P {
        self.pin
    }

    fn set(&mut self, on: bool) {
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if res.is_err() {
            warn!("buzzer: GPIO write failed (on={})", on);
        }
    }
}

impl<P: OutputPin, D: DelayNs> AlertPort for Buzzer<P, D> {
    fn pulse(&mut self) {
        self.set(true);
        self.delay.delay_ms(self.on_ms);
        self.set(false);
        self.delay.delay_ms(self.off_ms);
    }

    fn silence(&mut self) {
        self.set(false);
    }
}
