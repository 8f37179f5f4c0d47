pub mod file;
pub mod http;

pub use file::FileSeed;
pub use http::HttpSeed;
