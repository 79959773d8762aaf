/// File utilities
pub mod files;

/// HTTP download utilities
pub mod download;

/// Local resource verification
pub mod resources;
