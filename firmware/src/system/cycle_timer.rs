use fugit::ExtU32;

use ovenwatch_control::CountdownTimer;

use crate::system::hal::pac::TIM2;
use crate::system::hal::timer::{CounterMs, Event};

/// TIM2 counting down the period of a cycle in milliseconds.
///
/// The counter always reloads on its own, raising the `TIM2` interrupt on
/// every update.
pub struct CycleTimer {
    counter: CounterMs<TIM2>,
}

impl CycleTimer {
    #[must_use]
    pub fn new(counter: CounterMs<TIM2>) -> Self {
        Self { counter }
    }
}

impl CountdownTimer for CycleTimer {
    fn configure(&mut self, ticks: u32, auto_reload: bool) {
        defmt::debug_assert!(auto_reload, "TIM2 only runs in periodic mode");
        self.counter.unlisten(Event::Update);
        if let Err(error) = self.counter.start(ticks.millis()) {
            defmt::panic!(
                "Failed to start the cycle timer: {}",
                defmt::Debug2Format(&error)
            );
        }
    }

    fn enable(&mut self) {
        self.counter.clear_interrupt(Event::Update);
        self.counter.listen(Event::Update);
    }

    fn acknowledge(&mut self) {
        self.counter.clear_interrupt(Event::Update);
    }
}
