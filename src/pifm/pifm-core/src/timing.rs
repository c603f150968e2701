use core::ptr;

/// Busy-wait iterations between two divisor writes
///
/// This is an approximation, not a timer. Each iteration is a volatile load,
/// add and store of a counter plus the loop compare, about six instructions;
/// at 850 MHz under load and 22.05 kHz audio that gives
/// 850000000 / 22050 / 6 = 6424.8 iterations per sample, trimmed a little to
/// cover the rest of the sample loop. Retune here for a different CPU clock.
pub const CYCLES_PER_SAMPLE: u32 = 6350;

/// Spin for `n` iterations without yielding to the scheduler
///
/// Returns the final value of the spin counter, which equals `n`.
pub fn delay_cycles(n: u32) -> u32 {
    // Volatile accesses keep the compiler from folding the loop away
    let mut clock: u32 = 0;
    let clock_ptr: *mut u32 = &mut clock;
    for _ in 0..n {
        unsafe { ptr::write_volatile(clock_ptr, ptr::read_volatile(clock_ptr).wrapping_add(1)) };
    }
    unsafe { ptr::read_volatile(clock_ptr) }
}
