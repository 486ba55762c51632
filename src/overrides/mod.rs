pub mod file;
pub mod fixed;
pub mod memory;
pub mod traits;

pub use file::FileOverrides;
pub use fixed::StaticOverrides;
pub use memory::MemoryOverrides;
pub use traits::{OverrideError, OverrideProvider};
