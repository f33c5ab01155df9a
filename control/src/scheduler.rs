//! Free-running countdown raising a cycle-expired event at a fixed period.

use fugit::MillisDurationU32;

use crate::error::ConfigError;

/// Hardware countdown driving the cycles.
///
/// Implementors raise the cycle-expired interrupt when the countdown
/// reaches zero and, with auto-reload, restart it with the same tick count.
pub trait CountdownTimer {
    fn configure(&mut self, ticks: u32, auto_reload: bool);
    fn enable(&mut self);
    /// Clear the pending expiry so the interrupt does not fire again.
    fn acknowledge(&mut self);
}

/// Resolution and range of a countdown counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickRate {
    pub hz: u32,
    pub max_ticks: u32,
}

impl TickRate {
    /// A 16-bit counter prescaled to `hz`.
    #[must_use]
    pub const fn sixteen_bit(hz: u32) -> Self {
        Self {
            hz,
            max_ticks: u16::MAX as u32,
        }
    }

    /// A 32-bit counter prescaled to `hz`.
    #[must_use]
    pub const fn thirty_two_bit(hz: u32) -> Self {
        Self {
            hz,
            max_ticks: u32::MAX,
        }
    }
}

/// Cycle period expressed in ticks of a known counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Period {
    ticks: u32,
    rate: TickRate,
}

impl Period {
    /// # Errors
    ///
    /// Fails when the duration is shorter than a single tick or when it
    /// needs more ticks than the counter holds.
    pub fn new(duration: MillisDurationU32, rate: TickRate) -> Result<Self, ConfigError> {
        let ticks = u64::from(duration.to_millis()) * u64::from(rate.hz) / 1000;
        if ticks == 0 {
            return Err(ConfigError::PeriodTooShort);
        }
        if ticks > u64::from(rate.max_ticks) {
            return Err(ConfigError::PeriodOverflow {
                ticks,
                max_ticks: rate.max_ticks,
            });
        }
        Ok(Self {
            ticks: ticks as u32,
            rate,
        })
    }

    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    #[must_use]
    pub fn rate(&self) -> TickRate {
        self.rate
    }

    #[must_use]
    pub fn duration(&self) -> MillisDurationU32 {
        let millis = u64::from(self.ticks) * 1000 / u64::from(self.rate.hz);
        MillisDurationU32::from_ticks(millis as u32)
    }
}

/// Arms a countdown timer and counts the cycles it produces.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scheduler<T> {
    timer: T,
    period: Option<Period>,
    expired: u32,
}

impl<T: CountdownTimer> Scheduler<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            period: None,
            expired: 0,
        }
    }

    /// Configure the countdown for `period` with auto-reload and start it.
    ///
    /// There is no drift correction or skipped-cycle detection, the
    /// hardware restarts the countdown on its own.
    pub fn arm(&mut self, period: Period) {
        self.timer.configure(period.ticks(), true);
        self.timer.enable();
        self.period = Some(period);
    }

    /// Acknowledge an expiry and return its cycle id.
    pub fn expire(&mut self) -> u32 {
        self.timer.acknowledge();
        let cycle = self.expired;
        self.expired = self.expired.wrapping_add(1);
        cycle
    }

    #[must_use]
    pub fn period(&self) -> Option<Period> {
        self.period
    }

    #[must_use]
    pub fn expired(&self) -> u32 {
        self.expired
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

/// Software model of an auto-reloading down-counter.
///
/// It stands in for the hardware timer on the host. Time is advanced
/// explicitly and every reach of zero is reported as a pending expiry.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    reload: u32,
    remaining: u32,
    auto_reload: bool,
    running: bool,
    pending: u32,
}

impl CountdownTimer for Countdown {
    fn configure(&mut self, ticks: u32, auto_reload: bool) {
        self.reload = ticks;
        self.remaining = ticks;
        self.auto_reload = auto_reload;
    }

    fn enable(&mut self) {
        self.running = self.reload > 0;
    }

    fn acknowledge(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }
}

impl Countdown {
    /// Advance the counter by `ticks`, returning how many times it expired.
    pub fn advance(&mut self, mut ticks: u32) -> u32 {
        let mut expirations = 0;
        while self.running && ticks > 0 {
            if ticks < self.remaining {
                self.remaining -= ticks;
                break;
            }
            ticks -= self.remaining;
            expirations += 1;
            if self.auto_reload {
                self.remaining = self.reload;
            } else {
                self.remaining = 0;
                self.running = false;
            }
        }
        self.pending = self.pending.saturating_add(expirations);
        expirations
    }

    /// Ticks left until the next expiry.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Expiries not acknowledged yet.
    #[must_use]
    pub fn pending(&self) -> u32 {
        self.pending
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
