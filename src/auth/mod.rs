//! OAuth implicit-grant login and token storage.

pub mod error;
pub mod flow;
pub mod request;
pub mod session;
pub mod store;
pub mod surface;
pub mod token;

pub use error::AuthError;
pub use flow::{AuthFlow, Authorizer};
pub use request::AuthRequest;
pub use session::{AuthSession, AuthState, Navigation};
pub use store::{FileTokenStore, TokenStore};
pub use surface::{
    ConsoleSurface, ConsoleSurfaceProvider, NavigableSurface, SurfaceEvent, SurfaceProvider,
};
pub use token::Token;
