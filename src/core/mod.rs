pub mod backup;
pub mod commission;
pub mod employee;
pub mod entry;
pub mod log;
pub mod report;
pub mod revenue;
pub mod settings;
pub mod summary;
