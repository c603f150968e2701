use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use log::error;
use pifm_core::constants::address_space;
use pifm_core::registers::{offset_in_window, RegisterBus};

/// Register file that records writes instead of touching hardware
///
/// Unwritten registers read as 0 unless preset with `with_register`.
#[derive(Default)]
pub struct SimulatedBus {
    registers: Mutex<HashMap<usize, u32>>,
    writes: Mutex<Vec<(usize, u32)>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SimulatedBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presets a register without recording a write
    pub fn with_register(self, offset: usize, value: u32) -> Self {
        lock(&self.registers).insert(offset, value);
        self
    }

    pub fn register(&self, offset: usize) -> u32 {
        lock(&self.registers).get(&offset).copied().unwrap_or(0)
    }

    /// Every accepted write, oldest first
    pub fn writes(&self) -> Vec<(usize, u32)> {
        lock(&self.writes).clone()
    }

    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        lock(&self.writes)
            .iter()
            .filter(|(o, _)| *o == offset)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn clear_writes(&self) {
        lock(&self.writes).clear();
    }
}

impl RegisterBus for SimulatedBus {
    fn read(&self, offset: usize) -> u32 {
        if !offset_in_window(offset, address_space::WINDOW_SIZE) {
            error!("Simulated read outside window (offset: 0x{:x})", offset);
            return 0;
        }
        self.register(offset)
    }

    fn write(&self, offset: usize, value: u32) {
        if !offset_in_window(offset, address_space::WINDOW_SIZE) {
            error!("Simulated write outside window (offset: 0x{:x})", offset);
            return;
        }
        lock(&self.registers).insert(offset, value);
        lock(&self.writes).push((offset, value));
    }
}
