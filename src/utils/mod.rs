pub mod download;
pub mod graphql;
pub mod response;
