use crate::constants::gpio::*;

/// GPFSELn register holding ten 3-bit pin function fields
///
/// Bits 30-31 are reserved and carried through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinFunctionSelector(u32);

impl PinFunctionSelector {
    pub fn from_bits(raw: u32) -> Self {
        Self(raw)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    fn shift(pin: u32) -> u32 {
        (pin % PINS_PER_FSEL) * FSEL_FIELD_WIDTH
    }

    /// Function code currently selected for `pin` (pin number modulo 10)
    pub fn function(&self, pin: u32) -> u32 {
        (self.0 >> Self::shift(pin)) & FSEL_FIELD_MASK
    }

    /// Replace only the 3-bit field belonging to `pin`
    pub fn with_function(self, pin: u32, function: u32) -> Self {
        let shift = Self::shift(pin);
        let cleared = self.0 & !(FSEL_FIELD_MASK << shift);
        Self(cleared | ((function & FSEL_FIELD_MASK) << shift))
    }
}

#[cfg(test)]
mod gpio_tests {
    use super::*;

    #[test]
    fn test_alt0_on_pin4() {
        let fsel = PinFunctionSelector::from_bits(0).with_function(CLOCK_OUTPUT_PIN, FSEL_ALT0);
        assert_eq!(fsel.bits(), 0b100 << 12);
        assert_eq!(fsel.function(CLOCK_OUTPUT_PIN), FSEL_ALT0);
    }

    #[test]
    fn test_neighbour_fields_survive() {
        // Every pin except 4 holds a distinct sentinel, reserved bits set too
        let mut sentinel = PinFunctionSelector::from_bits(0b11 << 30);
        for pin in 0..PINS_PER_FSEL {
            if pin != CLOCK_OUTPUT_PIN {
                sentinel = sentinel.with_function(pin, (pin % 7) + 1);
            }
        }
        let updated = sentinel.with_function(CLOCK_OUTPUT_PIN, FSEL_ALT0);

        for pin in 0..PINS_PER_FSEL {
            if pin != CLOCK_OUTPUT_PIN {
                assert_eq!(updated.function(pin), sentinel.function(pin));
            }
        }
        assert_eq!(updated.bits() >> 30, 0b11);
        assert_eq!(updated.function(CLOCK_OUTPUT_PIN), FSEL_ALT0);
    }

    #[test]
    fn test_oversized_function_is_masked() {
        let fsel = PinFunctionSelector::from_bits(0).with_function(3, 0xFF);
        assert_eq!(fsel.bits(), 0b111 << 9);
    }
}
