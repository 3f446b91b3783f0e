pub mod use_cases;

pub use use_cases::activity_discovery::ActivityDiscoveryUseCase;
pub use use_cases::contact_import::ContactImportUseCase;
