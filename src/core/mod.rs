pub mod capturer;
pub mod convert;
