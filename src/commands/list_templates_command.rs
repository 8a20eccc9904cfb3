//! Template listing command

use serde::Serialize;

use crate::api::MockupKit;
use crate::commands::command_traits::Command;
use crate::errors::MockupResult;
use crate::template::TemplateInfo;

#[derive(Serialize)]
struct TemplateListing<'t> {
    count: usize,
    templates: &'t [TemplateInfo],
}

/// Command for printing the templates in the template directory as JSON
pub struct ListTemplatesCommand<'a> {
    kit: &'a MockupKit,
}

impl<'a> ListTemplatesCommand<'a> {
    pub fn new(kit: &'a MockupKit) -> Self {
        ListTemplatesCommand { kit }
    }
}

/// Render `templates` as the `{count, templates}` JSON document
pub fn render_listing(templates: &[TemplateInfo]) -> MockupResult<String> {
    let listing = TemplateListing {
        count: templates.len(),
        templates,
    };
    Ok(serde_json::to_string_pretty(&listing)?)
}

impl<'a> Command for ListTemplatesCommand<'a> {
    fn execute(&self) -> MockupResult<()> {
        let templates = self.kit.list_templates()?;
        // Only the JSON document goes to stdout
        println!("{}", render_listing(&templates)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_is_json() {
        let templates = vec![
            TemplateInfo { name: "mug".to_string(), has_params: false },
            TemplateInfo { name: "shirt".to_string(), has_params: true },
        ];

        let rendered = render_listing(&templates).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["templates"][1]["name"], "shirt");
        assert_eq!(value["templates"][1]["hasParams"], true);
        assert_eq!(value["templates"][0]["hasParams"], false);
    }
}
