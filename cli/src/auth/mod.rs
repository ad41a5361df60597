pub mod store;

pub use store::TokenStore;
