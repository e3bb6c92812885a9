pub mod bill;
pub mod classify;
pub(crate) mod common;
pub mod estimate;
pub mod shifts;
