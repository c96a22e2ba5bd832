/*!
 * Config: invocation policy and declarative command catalogs
 */

pub mod catalog;
pub mod reader;
pub mod types;

pub use catalog::CatalogLoader;
pub use reader::{parse_toml_content, ConfigReader};
pub use types::{InvocationConfig, UnknownArgumentPolicy};
