use crate::constants::audio::SAMPLES_PER_BLOCK;
use crate::constants::gpio::{CLOCK_OUTPUT_PIN, FSEL_ALT0};
use crate::constants::registers;
use crate::modulation::ModulationParameters;
use crate::registers::{ClockControl, ClockDivisor, PinFunctionSelector, RegisterBus};
use crate::timing;

use log::debug;

/// Outcome of one pass over a sample source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModulationSummary {
    pub samples_sent: usize,
    pub interrupted: bool, // stopped on request before the source ran dry
}

/// Drives GPCLK0 on GPIO 4 as a frequency modulated carrier
pub struct Transmitter<B: RegisterBus> {
    bus: B,
    cycles_per_sample: u32,
}

impl<B: RegisterBus> Transmitter<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            cycles_per_sample: timing::CYCLES_PER_SAMPLE,
        }
    }

    /// Overrides the busy-wait calibration used between samples
    pub fn with_cycles_per_sample(mut self, cycles: u32) -> Self {
        self.cycles_per_sample = cycles;
        self
    }

    pub fn cycles_per_sample(&self) -> u32 {
        self.cycles_per_sample
    }

    /// Routes GPCLK0 to its pin and switches the clock on or off
    ///
    /// Must not run while `run_modulation` is writing divisors.
    pub fn configure_clock_output(&self, enabled: bool) {
        self.bus.modify(registers::GPFSEL0, |raw| {
            PinFunctionSelector::from_bits(raw)
                .with_function(CLOCK_OUTPUT_PIN, FSEL_ALT0)
                .bits()
        });

        let control = ClockControl::transmitter(enabled).pack();
        debug!("CM_GP0CTL <- 0x{:08x}", control);
        self.bus.write(registers::CM_GP0CTL, control);
    }

    /// Writes the low 24 bits of `divisor` to CM_GP0DIV
    pub fn write_divisor(&self, divisor: u32) {
        self.bus
            .write(registers::CM_GP0DIV, ClockDivisor::new(divisor).pack());
    }

    /// Sends every sample in order, one divisor write per sample
    ///
    /// `stop_requested` is polled once per block of samples; when it returns
    /// true the loop ends early. Running out of samples is a normal finish.
    pub fn run_modulation<I, F>(
        &self,
        samples: I,
        params: &ModulationParameters,
        mut stop_requested: F,
    ) -> ModulationSummary
    where
        I: IntoIterator<Item = i16>,
        F: FnMut() -> bool,
    {
        let mut summary = ModulationSummary::default();

        for sample in samples {
            if summary.samples_sent % SAMPLES_PER_BLOCK == 0 && stop_requested() {
                summary.interrupted = true;
                break;
            }

            self.write_divisor(params.carrier_divisor(sample));
            timing::delay_cycles(self.cycles_per_sample);
            summary.samples_sent += 1;
        }

        summary
    }
}

#[cfg(test)]
mod transmitter_tests {
    use super::*;
    use crate::constants::clock::CM_PASSWORD;
    use core::cell::{Cell, RefCell};

    // Minimal register file covering the three registers the transmitter uses
    struct TestBus {
        fsel: Cell<u32>,
        ctl: Cell<u32>,
        div_writes: RefCell<heapless::Vec<u32, 64>>,
        writes: Cell<usize>,
    }

    impl TestBus {
        fn new(fsel: u32) -> Self {
            Self {
                fsel: Cell::new(fsel),
                ctl: Cell::new(0),
                div_writes: RefCell::new(heapless::Vec::new()),
                writes: Cell::new(0),
            }
        }
    }

    impl RegisterBus for TestBus {
        fn read(&self, offset: usize) -> u32 {
            match offset {
                registers::GPFSEL0 => self.fsel.get(),
                registers::CM_GP0CTL => self.ctl.get(),
                registers::CM_GP0DIV => self.div_writes.borrow().last().copied().unwrap_or(0),
                _ => 0,
            }
        }

        fn write(&self, offset: usize, value: u32) {
            self.writes.set(self.writes.get() + 1);
            match offset {
                registers::GPFSEL0 => self.fsel.set(value),
                registers::CM_GP0CTL => self.ctl.set(value),
                registers::CM_GP0DIV => {
                    let _ = self.div_writes.borrow_mut().push(value);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_enable_sets_pin_and_control() {
        let bus = TestBus::new(0);
        Transmitter::new(&bus).configure_clock_output(true);
        assert_eq!(bus.fsel.get(), 0b100 << 12);
        assert_eq!(bus.ctl.get(), 0x5A00_0116);
    }

    #[test]
    fn test_disable_clears_enable_and_flip() {
        let bus = TestBus::new(0);
        let tx = Transmitter::new(&bus);
        tx.configure_clock_output(true);
        tx.configure_clock_output(false);
        let ctl = ClockControl::unpack(bus.ctl.get());
        assert!(!ctl.enable && !ctl.flip);
        assert_eq!(bus.ctl.get() >> 24, CM_PASSWORD);
    }

    #[test]
    fn test_configure_keeps_other_pins() {
        // pins 0-3 and 5-9 hold sentinels, pin 4 starts as output (001)
        let sentinel = 0b10_101_011_001_110_001_001_010_011_101 & !(0b111 << 12) | (0b001 << 12);
        let bus = TestBus::new(sentinel);
        Transmitter::new(&bus).configure_clock_output(true);
        let after = bus.fsel.get();
        assert_eq!(after & !(0b111 << 12), sentinel & !(0b111 << 12));
        assert_eq!((after >> 12) & 0b111, FSEL_ALT0);
    }

    #[test]
    fn test_divisor_write_keeps_password() {
        let bus = TestBus::new(0);
        let tx = Transmitter::new(&bus);
        tx.write_divisor(0x0123_4567);
        tx.write_divisor(20480);
        let writes = bus.div_writes.borrow();
        assert_eq!(writes[0], 0x5A23_4567);
        assert_eq!(writes[1], 0x5A00_5000);
    }

    #[test]
    fn test_modulation_writes_one_divisor_per_sample() {
        let bus = TestBus::new(0);
        let tx = Transmitter::new(&bus).with_cycles_per_sample(0);
        let params = ModulationParameters::with_default_bandwidth(100.0).unwrap();

        let summary = tx.run_modulation([0i16, 32767, -32768].iter().copied(), &params, || false);

        assert_eq!(summary.samples_sent, 3);
        assert!(!summary.interrupted);
        let writes = bus.div_writes.borrow();
        assert_eq!(&writes[..], &[0x5A00_5000, 0x5A00_5000 + 12, 0x5A00_5000 - 13]);
    }

    #[test]
    fn test_exhausted_source_is_not_an_error() {
        let bus = TestBus::new(0);
        let tx = Transmitter::new(&bus).with_cycles_per_sample(0);
        let params = ModulationParameters::with_default_bandwidth(100.0).unwrap();

        let summary = tx.run_modulation(core::iter::empty(), &params, || false);
        assert_eq!(summary, ModulationSummary::default());
        assert_eq!(bus.writes.get(), 0);
    }

    #[test]
    fn test_stop_request_is_polled_per_block() {
        let bus = TestBus::new(0);
        let tx = Transmitter::new(&bus).with_cycles_per_sample(0);
        let params = ModulationParameters::with_default_bandwidth(100.0).unwrap();
        let polls = Cell::new(0);

        let summary = tx.run_modulation(core::iter::repeat(0i16), &params, || {
            polls.set(polls.get() + 1);
            polls.get() > 2
        });

        assert!(summary.interrupted);
        assert_eq!(summary.samples_sent, 2 * SAMPLES_PER_BLOCK);
        assert_eq!(polls.get(), 3);
    }
}
