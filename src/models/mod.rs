// Module exports for models

pub mod appointment;
pub mod layout;
pub mod period;
pub mod settings;
