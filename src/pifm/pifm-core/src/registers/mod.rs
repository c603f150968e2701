mod clock;
mod gpio;

pub use clock::{ClockControl, ClockDivisor, ClockSource, MashMode};
pub use gpio::PinFunctionSelector;

use crate::constants::address_space;

/// Word-wide access to the memory-mapped peripheral window
///
/// Offsets are relative to the start of the window (see
/// [`address_space::bus_to_offset`]). Implementations must reject offsets
/// that fall outside the window or are not word aligned; a rejected write is
/// dropped and a rejected read yields 0, the same way the hardware ignores a
/// write it does not accept.
pub trait RegisterBus {
    fn read(&self, offset: usize) -> u32;
    fn write(&self, offset: usize, value: u32);

    /// Read, transform and write back a single register
    fn modify<F>(&self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
        Self: Sized,
    {
        let current = self.read(offset);
        self.write(offset, f(current));
    }
}

impl<'a, T: RegisterBus + ?Sized> RegisterBus for &'a T {
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    fn write(&self, offset: usize, value: u32) {
        (**self).write(offset, value)
    }
}

/// True when `offset` names a whole register inside a window of `len` bytes
pub fn offset_in_window(offset: usize, len: usize) -> bool {
    offset % address_space::REGISTER_WIDTH == 0
        && offset
            .checked_add(address_space::REGISTER_WIDTH)
            .map_or(false, |end| end <= len)
}
