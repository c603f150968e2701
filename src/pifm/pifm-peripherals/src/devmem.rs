use std::fmt::{Debug, Formatter};
use std::fs::OpenOptions;
use std::path::Path;

use log::{debug, error};
use memmap2::{MmapOptions, MmapRaw};
use pifm_core::constants::address_space;
use pifm_core::registers::{offset_in_window, RegisterBus};

use crate::error::{PifmError, Result};

pub const DEV_MEM: &str = "/dev/mem";

/// Peripheral registers mapped into this process through the memory device
///
/// The mapping lives until the window is dropped; in practice that is the end
/// of the process.
pub struct DevMemWindow {
    mmap: MmapRaw,
    phys_offset: u64,
}

impl DevMemWindow {
    /// Maps the 16 MiB peripheral window from /dev/mem
    pub fn acquire() -> Result<Self> {
        Self::map(
            DEV_MEM,
            address_space::PERIPHERAL_PHYS_BASE,
            address_space::WINDOW_SIZE,
        )
    }

    /// Maps `len` bytes of `path` starting at `phys_offset`
    pub fn map<P: AsRef<Path>>(path: P, phys_offset: u64, len: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| PifmError::DeviceAccess {
                path: path.display().to_string(),
                source,
            })?;

        let mmap = MmapOptions::new()
            .offset(phys_offset)
            .len(len)
            .map_raw(&file)
            .map_err(|source| PifmError::Mapping {
                offset: phys_offset,
                len,
                source,
            })?;

        // The mapping stays valid once the file is closed
        drop(file);

        debug!(
            "Mapped {:#x} bytes of {} at {:#010x} -> {:?}",
            len,
            path.display(),
            phys_offset,
            mmap.as_ptr()
        );
        Ok(Self { mmap, phys_offset })
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn phys_offset(&self) -> u64 {
        self.phys_offset
    }
}

impl Debug for DevMemWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DevMemWindow({:?}, {:#010x}, {:#x})",
            self.mmap.as_ptr(),
            self.phys_offset,
            self.mmap.len()
        )
    }
}

impl RegisterBus for DevMemWindow {
    fn read(&self, offset: usize) -> u32 {
        if !offset_in_window(offset, self.mmap.len()) {
            error!("Register read outside mapped window (offset: 0x{:x})", offset);
            return 0;
        }
        // In bounds and word aligned, checked above
        unsafe { (self.mmap.as_ptr().add(offset) as *const u32).read_volatile() }
    }

    fn write(&self, offset: usize, value: u32) {
        if !offset_in_window(offset, self.mmap.len()) {
            error!(
                "Register write outside mapped window (offset: 0x{:x}, value: 0x{:08x})",
                offset, value
            );
            return;
        }
        unsafe { (self.mmap.as_mut_ptr().add(offset) as *mut u32).write_volatile(value) }
    }
}

#[cfg(test)]
mod devmem_tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    // A plain file stands in for the memory device
    fn backing_file(name: &str, len: usize) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pifm-{}-{}", std::process::id(), name));
        fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    #[test]
    fn test_missing_device_is_access_error() {
        let err = DevMemWindow::map("/nonexistent/pifm-mem", 0, 4096).unwrap_err();
        assert!(matches!(err, PifmError::DeviceAccess { .. }));
    }

    #[test]
    fn test_unmappable_device_is_mapping_error() {
        let err = DevMemWindow::map("/dev/null", 0, 4096).unwrap_err();
        assert!(matches!(err, PifmError::Mapping { len: 4096, .. }));
    }

    #[test]
    fn test_registers_hit_backing_memory() {
        let path = backing_file("window", 4096);
        let window = DevMemWindow::map(&path, 0, 4096).unwrap();
        window.write(0x70, 0x5A00_0116);
        window.write(0x74, 0x5A00_5000);
        assert_eq!(window.read(0x70), 0x5A00_0116);
        assert_eq!(window.len(), 4096);
        drop(window);

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0x74..0x78], &0x5A00_5000u32.to_ne_bytes());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_out_of_window_access_is_ignored() {
        let path = backing_file("bounds", 4096);
        let window = DevMemWindow::map(&path, 0, 4096).unwrap();
        window.write(4096, 0xFFFF_FFFF);
        window.write(0x72, 0xFFFF_FFFF);
        assert_eq!(window.read(4096), 0);
        assert_eq!(window.read(0x70), 0);
        drop(window);
        fs::remove_file(&path).unwrap();
    }
}
