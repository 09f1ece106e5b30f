pub mod api;
pub mod auth;
pub mod cookies;
pub mod interceptor;
pub mod session_store;
pub mod tax;

#[cfg(test)]
pub mod test_support;
