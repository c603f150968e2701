pub mod devmem;
pub mod error;
pub mod sim;
pub mod teardown;
pub mod wav;

pub use devmem::DevMemWindow;
pub use error::{PifmError, Result};
pub use sim::SimulatedBus;
pub use teardown::{Teardown, TeardownGuard, TeardownState};
pub use wav::WavSamples;
