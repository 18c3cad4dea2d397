pub mod headers;
pub mod password;
pub mod rate_limit;
pub mod validation;

pub use headers::SecurityHeadersMiddleware;
pub use password::PasswordHasher;
pub use rate_limit::{IpRateLimiter, client_ip};
pub use validation::Validator;
