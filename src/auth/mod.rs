//! Authentication for the IoT Hub APIs.
//!
//! Both APIs are protected by an OAuth2 client-credentials grant: the
//! confidential client authenticates with its own id and secret (no end
//! user) against a tenant-scoped authority and receives a bearer token for
//! the configured scope.
//!
//! Acquisition is "silent first": a still-valid token from the in-process
//! cache is returned without a network round trip, and only a cache miss
//! or an expired entry triggers a fresh grant.
//!
//! ```no_run
//! use iothub_rs::auth::ConfidentialClient;
//! use secrecy::SecretString;
//!
//! # async fn example() -> iothub_rs::Result<()> {
//! let auth = ConfidentialClient::new(
//!     "my-tenant",
//!     "my-client-id",
//!     SecretString::from(std::env::var("CLIENT_SECRET").unwrap()),
//! );
//! let token = auth.acquire_token(&["api://iothub/.default".into()]).await?;
//! println!("expires at {}", token.expires_at());
//! # Ok(())
//! # }
//! ```

mod token;

pub use token::{ConfidentialClient, Token, DEFAULT_AUTHORITY};
