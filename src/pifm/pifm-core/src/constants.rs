// Peripheral window as seen by the ARM core (BCM2835)
pub mod address_space {
    // Bus address the datasheet uses for every peripheral register
    pub const PERIPHERAL_BUS_BASE: usize = 0x7E00_0000;

    // Physical address of the same window on the ARM side
    pub const PERIPHERAL_PHYS_BASE: u64 = 0x2000_0000;

    // Size of the mapped window (16 MiB covers every peripheral block)
    pub const WINDOW_SIZE: usize = 0x0100_0000;

    // Registers are 32 bits wide and must be accessed on word boundaries
    pub const REGISTER_WIDTH: usize = 4;

    /// Converts a datasheet bus address into an offset from the start of the window
    pub const fn bus_to_offset(bus_addr: usize) -> usize {
        bus_addr - PERIPHERAL_BUS_BASE
    }
}

pub mod registers {
    use super::address_space::bus_to_offset;

    // GPIO function select for pins 0-9 (p.90)
    pub const GPFSEL0: usize = bus_to_offset(0x7E20_0000);

    // General purpose clock 0 control (p.107)
    pub const CM_GP0CTL: usize = bus_to_offset(0x7E10_1070);

    // General purpose clock 0 divisor (p.108)
    pub const CM_GP0DIV: usize = bus_to_offset(0x7E10_1074);
}

pub mod gpio {
    // Pins covered by a single function select register
    pub const PINS_PER_FSEL: u32 = 10;
    pub const FSEL_FIELD_WIDTH: u32 = 3;
    pub const FSEL_FIELD_MASK: u32 = 0b111;

    // GPIO 4 carries GPCLK0 when switched to alternate function 0 (p.92)
    pub const CLOCK_OUTPUT_PIN: u32 = 4;
    pub const FSEL_ALT0: u32 = 0b100;
}

pub mod clock {
    // Password required in the top byte of every clock manager write
    pub const CM_PASSWORD: u32 = 0x5A;
    pub const PASSWORD_SHIFT: u32 = 24;
    pub const PASSWORD_MASK: u32 = 0xFF;

    // CM_GP0CTL field layout (p.107)
    pub const CTL_SRC_SHIFT: u32 = 0;
    pub const CTL_SRC_MASK: u32 = 0xF;
    pub const CTL_ENAB_SHIFT: u32 = 4;
    pub const CTL_KILL_SHIFT: u32 = 5;
    pub const CTL_BUSY_SHIFT: u32 = 7;
    pub const CTL_FLIP_SHIFT: u32 = 8;
    pub const CTL_MASH_SHIFT: u32 = 9;
    pub const CTL_MASH_MASK: u32 = 0x3;

    // CM_GP0DIV field layout (p.108)
    pub const DIV_MASK: u32 = 0x00FF_FFFF; // DIVI and DIVF together
    pub const DIVI_SHIFT: u32 = 12;
    pub const DIVI_MASK: u32 = 0xFFF;
    pub const DIVF_MASK: u32 = 0xFFF;

    // PLLD runs at 500 MHz and is the clock source fed to GPCLK0
    pub const PLLD_FREQUENCY_MHZ: f32 = 500.0;

    // One unit of the integer divisor expressed in DIV register units
    pub const DIVISOR_SCALE: f32 = 4096.0;
}

pub mod audio {
    // Bytes skipped at the start of the audio file before samples begin
    pub const HEADER_SIZE: u64 = 22;

    // Bytes pulled from the audio file per read
    pub const BLOCK_BYTES: usize = 1024;
    pub const SAMPLES_PER_BLOCK: usize = BLOCK_BYTES / 2;

    // Full scale of a signed 16-bit sample
    pub const SAMPLE_SCALE: f32 = 65536.0;

    // Default bandwidth (power) scale; it should only ever be lowered
    pub const DEFAULT_BANDWIDTH: f32 = 25.0;
}
