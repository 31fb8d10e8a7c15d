//! Data models for the lending ledger

pub mod equipment;
pub mod register;
pub mod student;

// Re-export commonly used types
pub use equipment::Equipment;
pub use register::{CreateRegister, Register, RegisterDetails, RegisterStatus, UpdateRegister};
pub use student::Student;
