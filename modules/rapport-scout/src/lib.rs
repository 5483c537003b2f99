pub mod comparator;
pub mod error;
pub mod normalizer;
pub mod orchestrator;
pub mod poller;
pub mod providers;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use comparator::Comparator;
pub use error::{CompareError, ScrapeError};
pub use orchestrator::{degraded_profile, try_in_order, ScrapeOrchestrator};
pub use poller::{PollConfig, RunPoller};
pub use providers::{ProviderRegistry, ProviderSpec};
pub use traits::{LanguageModel, RunBackend};
