pub mod batch;
pub mod limit;
pub mod rows;
pub mod upload;
