pub mod registry;

pub use registry::{lookup, year_options, TemplateId, TemplateInfo, TemplateStyle, TEMPLATES};
