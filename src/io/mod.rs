//! I/O layer: template files, JSON data files and render destinations.
pub mod json;
pub mod output;
pub mod template;

pub use output::Destination;
pub use template::DocTemplate;
