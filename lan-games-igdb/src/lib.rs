pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod lookup;
pub mod types;

pub use auth::{AuthProvider, StaticAuth, TwitchAuth};
pub use client::IgdbClient;
pub use credentials::{
    CredentialSource, CredentialSources, Credentials, config_path, credential_sources,
    save_to_file,
};
pub use error::IgdbError;
pub use lookup::{CatalogApi, LookupCache};
