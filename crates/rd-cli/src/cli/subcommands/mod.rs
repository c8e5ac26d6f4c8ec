mod goals;
mod hazards;
mod project;
mod system;
mod template;

pub use goals::GoalsCommands;
pub use hazards::HazardsCommands;
pub use project::ProjectCommands;
pub use system::SystemCommands;
pub use template::TemplateCommands;
