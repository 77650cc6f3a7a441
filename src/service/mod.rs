pub mod credentials;
pub mod validator;
