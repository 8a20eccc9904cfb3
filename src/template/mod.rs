//! Template storage
//!
//! Naming rules for templates and their parameter files, plus reading and
//! writing the placement parameters derived from box templates.

mod params;
mod store;

pub use self::params::{read_params, save_params, PlacementOverrides, PlacementParams};
pub use self::store::{
    params_path_for_box, validate_template_name, TemplateInfo, TemplateStore, BOX_SUFFIX,
};
