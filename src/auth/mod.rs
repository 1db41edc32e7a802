//! Authentication module
//!
//! Two pieces: the resolver picks the credential a connection uses (static
//! API token or OAuth2 client pair), and the `TokenAcquirer` turns a client
//! pair into a cached bearer token. `Bearer` ties the two to outgoing requests.

mod acquirer;
mod bearer;
mod resolver;
mod types;

pub use acquirer::{TokenAcquirer, AUDIENCE};
pub use bearer::Bearer;
pub use resolver::resolve;
pub use types::{AuthMethod, CachedToken, CredentialSource, Credentials};
