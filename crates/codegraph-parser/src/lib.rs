pub mod collect;
pub mod pipeline;
pub mod swift;

pub use collect::collect_source_files;
pub use pipeline::parse_all;
pub use swift::SwiftParser;
