#![no_main]
#![no_std]

use defmt_rtt as _; // Global logger.
use panic_probe as _;
use stm32f1xx_hal as _; // Interrupt vectors.

#[cfg(all(feature = "polling", feature = "no-handshake"))]
compile_error!("features `polling` and `no-handshake` are mutually exclusive");

pub mod config;
pub mod system;

// Same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked.
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
