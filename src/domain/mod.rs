pub mod notice;
pub mod outcome;
pub mod request;
pub mod validation;
