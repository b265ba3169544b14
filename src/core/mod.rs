pub mod errors;
pub mod fixture;
pub mod helpers;
pub mod pagination;
pub mod query_params;
