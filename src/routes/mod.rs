mod auth;
mod health_check;

pub use auth::current_user;
pub use auth::login;
pub use auth::logout;
pub use auth::refresh;
pub use auth::register;
pub use health_check::health_check;
