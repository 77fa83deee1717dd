pub mod dominant;
pub mod polarity;
pub mod request;
