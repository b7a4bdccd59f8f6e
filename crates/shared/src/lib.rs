pub mod domain;
pub mod mock;
pub mod strings;
