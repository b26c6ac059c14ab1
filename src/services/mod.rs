// Service module exports

pub mod activation;
pub mod calendar;
pub mod clock;
pub mod labels;
pub mod layout;
pub mod navigation;
pub mod report;
pub mod selection;
pub mod settings;
pub mod source;
