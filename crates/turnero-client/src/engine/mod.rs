pub mod billing;
pub mod classify;
pub mod date;
pub mod estimate;
pub mod normalize;
pub mod plan;
pub mod policy;
pub mod records;
pub mod types;
pub mod window;
