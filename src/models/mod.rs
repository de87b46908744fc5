pub mod address;
pub mod organization;
pub mod scan_group;
pub mod user_context;

pub use address::*;
pub use organization::*;
pub use scan_group::*;
pub use user_context::*;
