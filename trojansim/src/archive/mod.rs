pub mod snapshot;
pub mod writer;
pub mod reader;
pub mod extract;
