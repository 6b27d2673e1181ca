pub mod detect;
pub mod validate;
