/// Browser bindings for the host traits
pub mod chrome;
pub mod dom;
pub mod http;
