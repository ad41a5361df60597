pub mod error;
pub mod highlight;
pub mod logging;
pub mod spinner;
