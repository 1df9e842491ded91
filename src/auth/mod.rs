pub mod context;
pub mod login;
pub mod principal;
pub mod revocation;
pub mod session;
pub mod token;

pub use context::{Authenticated, RequestContext};
pub use login::{AuthorizeView, LoginOutcome, LoginOutcomeHandler, LogoutOutcome};
pub use principal::Principal;
pub use revocation::{RevocationStore, RevokeOutcome};
pub use session::SessionAuthenticator;
pub use token::{IssuedToken, TokenClaims, TokenCodec, bearer_token};
