pub mod email;
pub mod error;
pub mod extract;
pub mod pages;
pub mod sanitize;
pub mod state;
pub mod submit;
pub mod validate;
