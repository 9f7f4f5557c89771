//! Resource URI templates and static resource definitions.

use dice_roller::DiceExpression;

use crate::types::{ResourceDefinition, ResourceTemplateDefinition};

/// Scheme prefix shared by every dice resource.
pub const DICE_SCHEME: &str = "dice://";

pub fn list_templates() -> Vec<ResourceTemplateDefinition> {
    vec![ResourceTemplateDefinition {
        uri_template: format!("{DICE_SCHEME}{{notation}}"),
        name: "Dice Roll".to_string(),
        description: Some("Roll dice in NdS notation, e.g. dice://1d20".to_string()),
        mime_type: Some("application/json".to_string()),
    }]
}

pub fn list_resources(default_roll: DiceExpression) -> Vec<ResourceDefinition> {
    vec![ResourceDefinition {
        uri: format!("{DICE_SCHEME}{default_roll}"),
        name: format!("Random {default_roll} roll"),
        description: Some(describe(default_roll)),
        mime_type: Some("application/json".to_string()),
    }]
}

fn describe(expr: DiceExpression) -> String {
    let dice = if expr.count == 1 { "die" } else { "dice" };
    format!("Roll {} {}-sided {dice}", expr.count, expr.sides)
}
