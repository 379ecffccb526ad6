pub mod indicator;
pub mod metadata;
pub mod progress;
pub mod yaml;
