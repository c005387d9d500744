//! Blinky - two LEDs on independent schedules from one tick counter
//!
//! SysTick ticks at 10 kHz (100 us) from the 125 MHz system clock. After four
//! quick blinks with the blocking `delay_ms`, the main loop polls two timeouts
//! without ever blocking:
//!
//! - LED1 (GP25, the on-board LED) toggles every 234 ms
//! - LED2 (GP15) toggles every 1000 ms
//!
//! # Building
//! ```bash
//! cd demos/blinky
//! cargo build --release
//! ```
//!
//! # Flashing
//! ```bash
//! # With the Pico in BOOTSEL mode
//! cargo run --release
//! ```

#![no_std]
#![no_main]

use cortex_m_rt::{entry, exception};
use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use panic_halt as _;

use rp2040_hal::{
    clocks::{init_clocks_and_plls, Clock},
    gpio::Pins,
    pac,
    watchdog::Watchdog,
    Sio,
};

use tick_timeout_core::{PeriodicTimer, TickConfig, TickCounter, TickSource, TimeService};
use tick_timeout_port_cortex_m::SysTickTimer;

// Link in the Boot ROM - required for RP2040
#[link_section = ".boot2"]
#[used]
pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

/// 12 MHz crystal on the Pico
const XOSC_CRYSTAL_HZ: u32 = 12_000_000;

/// 100 us tick
const TICK_HZ: u32 = 10_000;

const INTRO_BLINKS: u32 = 4;
const INTRO_DELAY_MS: u32 = 200;
const LED1_PERIOD_MS: u32 = 234;
const LED2_PERIOD_MS: u32 = 1000;

static COUNTER: TickCounter = TickCounter::new();

#[exception]
fn SysTick() {
    COUNTER.on_tick();
}

#[entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();

    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let clocks = init_clocks_and_plls(
        XOSC_CRYSTAL_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = Sio::new(pac.SIO);
    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let mut led1 = pins.gpio25.into_push_pull_output();
    let mut led2 = pins.gpio15.into_push_pull_output();
    led1.set_low().unwrap();
    led2.set_low().unwrap();

    let config = TickConfig::builder()
        .timer_clock_hz(clocks.system_clock.freq().to_Hz())
        .tick_hz(TICK_HZ)
        .compare_limit(SysTickTimer::COMPARE_LIMIT)
        .build()
        .unwrap();

    // SysTick is an exception: no NVIC enable, and PRIMASK is clear out of reset
    let mut source = TickSource::new(SysTickTimer::new(core.SYST), &COUNTER, config).unwrap();
    source.start();

    let time = TimeService::new(&config, &COUNTER);

    for _ in 0..INTRO_BLINKS {
        led1.toggle().unwrap();
        led2.toggle().unwrap();
        time.delay_ms(INTRO_DELAY_MS);
    }

    let mut led1_timeout = time.timeout_ms(LED1_PERIOD_MS);
    let mut led2_seed = time.mark();

    loop {
        if led1_timeout.is_expired(&time) {
            led1.toggle().unwrap();
            led1_timeout.restart(&time);
        }

        if time.elapsed_ms(LED2_PERIOD_MS, led2_seed) {
            led2_seed = time.mark();
            led2.toggle().unwrap();
        }
    }
}
