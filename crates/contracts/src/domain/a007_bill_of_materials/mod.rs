pub mod aggregate;
pub mod expansion;
