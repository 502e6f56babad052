mod formatter_factory;
mod presenter_factory;
mod vcs_client_factory;

pub use formatter_factory::FormatterFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
pub use vcs_client_factory::VcsClientFactory;
