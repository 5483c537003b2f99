pub mod config;
pub mod error;
pub mod reference;
pub mod types;
pub mod urls;

pub use config::Config;
pub use error::RapportError;
pub use reference::reference_profile;
pub use types::*;
pub use urls::profile_handle;
