// Document steps of the memory bank pipeline.
//
// Each step owns its prompt wording; execution is shared through
// `WorkflowPhase::execute`.

#[path = "01_project_brief.rs"]
pub mod project_brief;
#[path = "02_product_context.rs"]
pub mod product_context;
#[path = "03_active_context.rs"]
pub mod active_context;
#[path = "04_system_patterns.rs"]
pub mod system_patterns;
#[path = "05_tech_context.rs"]
pub mod tech_context;

pub use active_context::ActiveContextPhase;
pub use product_context::ProductContextPhase;
pub use project_brief::ProjectBriefPhase;
pub use system_patterns::SystemPatternsPhase;
pub use tech_context::TechContextPhase;
