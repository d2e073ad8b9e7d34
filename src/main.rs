#![no_std]
#![no_main]

use core::convert::Infallible;

use esp_backtrace as _;
use esp_hal::gpio::{Input, InputConfig, Pull};
use touchlock::{
    active_profile,
    platform::{BusyDelay, HalClock, TouchPadOps},
    CredentialStore, LogScreen, RawSample, Session, TouchDriver,
};

/// Five touch modules with digital outputs, high while touched.
struct GpioPad<'d> {
    pins: [Input<'d>; 5],
}

impl TouchPadOps for GpioPad<'_> {
    type Error = Infallible;

    fn read(&mut self) -> Result<RawSample, Self::Error> {
        let mut touched = [false; 5];
        for (level, pin) in touched.iter_mut().zip(self.pins.iter()) {
            *level = pin.is_high();
        }
        Ok(RawSample::new(touched))
    }
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);
    let peripherals = esp_hal::init(esp_hal::Config::default());

    let config = InputConfig::default().with_pull(Pull::Down);
    // Up, Right, Down, Left, Center.
    let pad = GpioPad {
        pins: [
            Input::new(peripherals.GPIO13, config),
            Input::new(peripherals.GPIO12, config),
            Input::new(peripherals.GPIO14, config),
            Input::new(peripherals.GPIO27, config),
            Input::new(peripherals.GPIO33, config),
        ],
    };

    let profile = *active_profile();
    let mut store = CredentialStore::new(&profile);
    let driver = TouchDriver::new(pad, BusyDelay::new(), HalClock, profile);
    let mut session = Session::new(driver, LogScreen);
    log::info!(
        "touchlock: {} accounts max, {}-element patterns",
        store.capacity(),
        profile.pattern_len
    );

    session.greet();
    loop {
        match session.run_once(&mut store) {
            Ok(report) => log::debug!("touchlock: {:?}", report),
            Err(err) => log::warn!("touchlock: {}", err),
        }
    }
}
