//! LM35 temperature sensor wired to PA1, sampled by ADC1.
//!
//! Only one way of acquiring the batch is compiled in. The default lets DMA1
//! fill it in the background and signal the completion through the
//! `DMA1_CHANNEL1` interrupt. With the `no-handshake` feature, DMA1 refills
//! the buffer after every tick and the next tick takes whatever it holds.
//! With the `polling` feature, the batch is read conversion by conversion
//! within the timer interrupt.

use crate::system::hal::gpio;

pub type SensorPin = gpio::gpioa::PA1<gpio::Analog>;

#[cfg(feature = "polling")]
pub use polling::AdcSensor;
#[cfg(feature = "polling")]
pub type Acquisition = ovenwatch_control::Polling<AdcSensor>;

#[cfg(not(feature = "polling"))]
pub use transfer::AdcTransfer;
#[cfg(not(feature = "polling"))]
pub type Acquisition = ovenwatch_control::Transfer<AdcTransfer>;

#[cfg(feature = "polling")]
mod polling {
    use embedded_hal::adc::OneShot;
    use ovenwatch_control::{PollingSensor, Sample};

    use super::SensorPin;
    use crate::system::hal::adc::Adc;
    use crate::system::hal::pac::ADC1;

    /// ADC1 converting PA1 one sample at a time.
    pub struct AdcSensor {
        adc: Adc<ADC1>,
        pin: SensorPin,
        latest: Option<Sample>,
    }

    impl AdcSensor {
        #[must_use]
        pub fn new(adc: Adc<ADC1>, pin: SensorPin) -> Self {
            Self {
                adc,
                pin,
                latest: None,
            }
        }
    }

    impl PollingSensor for AdcSensor {
        fn trigger_one_shot(&mut self) {
            self.latest = None;
        }

        fn is_sample_ready(&mut self, _index: usize) -> bool {
            if self.latest.is_none() {
                // Start of conversion and wait for its end are both handled
                // by the HAL, `WouldBlock` only comes when ADC1 is busy.
                match self.adc.read(&mut self.pin) {
                    Ok(sample) => self.latest = Some(sample),
                    Err(nb::Error::WouldBlock) => (),
                    Err(nb::Error::Other(_)) => defmt::warn!("ADC1 conversion failed"),
                }
            }
            self.latest.is_some()
        }

        fn read_sample(&mut self, _index: usize) -> Sample {
            self.latest.take().unwrap_or_default()
        }
    }
}

#[cfg(not(feature = "polling"))]
mod transfer {
    use ovenwatch_control::{Handshake, Sample, TransferEngine};

    use super::SensorPin;
    use crate::config::SAMPLES;
    use crate::system::hal::adc::{Adc, AdcDma, Continuous};
    use crate::system::hal::dma::dma1::C1;
    use crate::system::hal::dma::{Event, ReadDma, Transfer, W};
    use crate::system::hal::pac::ADC1;

    type Buffer = &'static mut [Sample; SAMPLES];
    type Payload = AdcDma<SensorPin, Continuous>;

    enum State {
        Idle { payload: Payload, buffer: Buffer },
        Running(Transfer<W, Buffer, Payload>),
        // Only observable if a previous call panicked midway.
        Poisoned,
    }

    /// ADC1 in continuous mode streaming PA1 through DMA1 channel 1.
    ///
    /// Every enable starts a fresh pass of `SAMPLES` conversions. A pass
    /// still in flight is waited for first, so the destination always holds
    /// the last pass in full. While idle, the buffer holds the batch of the
    /// last transfer.
    pub struct AdcTransfer {
        state: State,
    }

    impl AdcTransfer {
        /// With a signaled handshake, the end of every pass raises the
        /// `DMA1_CHANNEL1` interrupt. Otherwise the passes run silently.
        #[must_use]
        pub fn new(
            adc: Adc<ADC1>,
            pin: SensorPin,
            mut dma: C1,
            buffer: Buffer,
            handshake: Handshake,
        ) -> Self {
            if handshake == Handshake::Signaled {
                dma.listen(Event::TransferComplete);
            }
            Self {
                state: State::Idle {
                    payload: adc.with_dma(pin, dma),
                    buffer,
                },
            }
        }
    }

    impl TransferEngine for AdcTransfer {
        fn configure_autonomous(&mut self, count: usize) {
            // Length of the transfer is given by the buffer.
            defmt::assert_eq!(count, SAMPLES);
        }

        fn enable(&mut self) {
            self.state = match core::mem::replace(&mut self.state, State::Poisoned) {
                State::Idle { payload, buffer } => State::Running(payload.read(buffer)),
                State::Running(transfer) => {
                    // A pass of 16 conversions takes well under a millisecond.
                    let (buffer, payload) = transfer.wait();
                    State::Running(payload.read(buffer))
                }
                State::Poisoned => defmt::panic!("Transfer state is poisoned"),
            };
        }

        fn transferred(&self) -> usize {
            match &self.state {
                State::Idle { .. } => SAMPLES,
                State::Running(transfer) => transfer.peek::<Sample>().len(),
                State::Poisoned => 0,
            }
        }

        fn read_slot(&self, index: usize) -> Sample {
            match &self.state {
                State::Idle { buffer, .. } => buffer[index],
                State::Running(transfer) => {
                    transfer.peek::<Sample>().get(index).copied().unwrap_or(0)
                }
                State::Poisoned => 0,
            }
        }

        fn finish(&mut self) {
            self.state = match core::mem::replace(&mut self.state, State::Poisoned) {
                State::Running(transfer) => {
                    let (buffer, payload) = transfer.wait();
                    State::Idle { payload, buffer }
                }
                idle @ State::Idle { .. } => idle,
                State::Poisoned => defmt::panic!("Transfer state is poisoned"),
            };
        }
    }
}
