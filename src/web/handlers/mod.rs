//! Web 请求处理器

pub mod dictionary;
pub mod shell;
pub mod status;
pub mod translate;

pub use dictionary::*;
pub use shell::*;
pub use status::*;
pub use translate::*;
