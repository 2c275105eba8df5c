pub mod collection;
pub mod config;
pub mod http;
pub mod memory;
pub mod record;
pub mod traits;

pub use collection::{Collection, DvrStatus};
pub use config::{ClientConfig, Credentials, Scheme};
pub use http::HttpDataSource;
pub use memory::StaticDataSource;
pub use record::Record;
pub use traits::DataSource;
