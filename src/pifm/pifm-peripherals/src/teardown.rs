use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::info;
use pifm_core::{RegisterBus, Transmitter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeardownState {
    Armed,
    ShutDown,
}

/// Switches the clock off exactly once, whoever asks first
///
/// Shared between the main loop, the termination handler and the exit guard.
/// The flag is a single atomic swap so a second request, from any thread,
/// never repeats the register writes.
pub struct Teardown<B: RegisterBus> {
    bus: Arc<B>,
    shut_down: AtomicBool,
}

impl<B: RegisterBus> Teardown<B> {
    pub fn new(bus: Arc<B>) -> Self {
        Self {
            bus,
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> TeardownState {
        if self.shut_down.load(Ordering::SeqCst) {
            TeardownState::ShutDown
        } else {
            TeardownState::Armed
        }
    }

    /// Disables the clock; returns false if an earlier call already did
    pub fn shut_down(&self) -> bool {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return false;
        }

        info!("Shutting down");
        Transmitter::new(&*self.bus).configure_clock_output(false);
        true
    }
}

/// Runs the teardown when dropped, covering early returns and unwinding
pub struct TeardownGuard<B: RegisterBus> {
    teardown: Arc<Teardown<B>>,
}

impl<B: RegisterBus> TeardownGuard<B> {
    pub fn new(teardown: Arc<Teardown<B>>) -> Self {
        Self { teardown }
    }
}

impl<B: RegisterBus> Drop for TeardownGuard<B> {
    fn drop(&mut self) {
        self.teardown.shut_down();
    }
}
