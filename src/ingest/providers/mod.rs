pub mod dir;
pub mod http;

pub use dir::DirArticleSource;
pub use http::HttpArticleSource;
