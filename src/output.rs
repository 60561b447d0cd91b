//! PWM lamp output
//!
//! Perceived brightness is not linear in duty cycle, so levels are gamma
//! corrected before they reach the PWM channel.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::level::MAX_LEVEL;

/// Default gamma of the lamp curve
pub const DEFAULT_GAMMA: f32 = 2.0;

/// Maps levels to duty cycles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaCurve {
    pub gamma: f32,
    /// Duty value that means "fully on"
    pub full_duty: u16,
}

impl GammaCurve {
    pub const fn new(gamma: f32, full_duty: u16) -> Self {
        Self { gamma, full_duty }
    }

    /// Duty for `level`: `(level / MAX_LEVEL) ^ gamma * full_duty`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duty(&self, level: u8) -> u16 {
        let level = level.min(MAX_LEVEL);
        if level == 0 {
            return 0;
        }
        if level == MAX_LEVEL {
            return self.full_duty;
        }

        let ratio = f32::from(level) / f32::from(MAX_LEVEL);
        let duty = libm::powf(ratio, self.gamma) * f32::from(self.full_duty);
        libm::roundf(duty).clamp(0.0, f32::from(self.full_duty)) as u16
    }
}

/// Output driver for a single PWM-dimmed lamp with an enable pin
pub struct PwmOutput<P: SetDutyCycle, E: OutputPin> {
    channel: P,
    enable: E,
    curve: GammaCurve,
}

impl<P: SetDutyCycle, E: OutputPin> PwmOutput<P, E> {
    /// Create an output with the default gamma, scaled to the channel's maximum duty
    pub fn new(channel: P, enable: E) -> Self {
        let curve = GammaCurve::new(DEFAULT_GAMMA, channel.max_duty_cycle());
        Self::with_curve(channel, enable, curve)
    }

    pub const fn with_curve(channel: P, enable: E, curve: GammaCurve) -> Self {
        Self {
            channel,
            enable,
            curve,
        }
    }

    pub const fn curve(&self) -> &GammaCurve {
        &self.curve
    }

    /// Release the underlying peripherals
    pub fn release(self) -> (P, E) {
        (self.channel, self.enable)
    }
}

impl<P: SetDutyCycle, E: OutputPin> OutputDriver for PwmOutput<P, E> {
    fn set_output_level(&mut self, level: u8) {
        let duty = self.curve.duty(level);
        if self.channel.set_duty_cycle(duty).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[PwmOutput.set_output_level] failed to set duty {:?}", duty);
        }
    }

    fn set_output_on_off(&mut self, is_on: bool) {
        let result = if is_on {
            self.enable.set_high()
        } else {
            self.enable.set_low()
        };
        if result.is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[PwmOutput.set_output_on_off] failed to switch lamp {:?}", is_on);
        }
    }
}
