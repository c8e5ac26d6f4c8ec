pub mod changes;
pub mod config;
pub mod dispatch;
pub mod goals;
pub mod hazards;
pub mod project;
pub mod results;
pub mod run;
pub mod shared;
pub mod system;
pub mod template;
