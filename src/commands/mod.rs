pub mod licenses;
pub mod submit;
pub mod validate_pr;
