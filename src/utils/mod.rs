// Utility functions
pub mod cuisines;
pub mod sanitize;
