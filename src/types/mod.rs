pub mod entry;
pub mod errors;
pub mod ids;
pub mod mode;
pub mod report;
pub mod request;
pub mod root;

pub use entry::*;
pub use errors::*;
pub use ids::*;
pub use mode::*;
pub use report::*;
pub use request::*;
pub use root::*;
