pub mod plans;
pub mod validate;
