pub mod uid;

pub use uid::*;
