//! Authentication and authorization
//!
//! bcrypt credentials, stateless JWT sessions carried in a cookie, and
//! ownership checks on resources.

mod cookie;
pub mod guard;
mod password;
mod session;
mod token;

pub use cookie::{CookiePolicy, SESSION_COOKIE};
pub use guard::{can_create, can_read, can_write, Owned, ReadAccess, ReadScope};
pub use password::{PasswordService, BCRYPT_COST};
pub use session::{identify, RequireIdentity, Session};
pub use token::{SessionClaims, SessionCodec, SESSION_TTL_SECS};
