//! Resource registration and dispatch.

use crate::context::DiceContext;
use crate::types::{
    McpError, McpResult, ReadResourceResult, ResourceDefinition, ResourceTemplateDefinition,
};

use super::{roll, templates};

pub struct ResourceRegistry;

impl ResourceRegistry {
    pub fn list_templates() -> Vec<ResourceTemplateDefinition> {
        templates::list_templates()
    }

    pub fn list_resources(ctx: &DiceContext) -> Vec<ResourceDefinition> {
        templates::list_resources(ctx.default_roll())
    }

    pub fn read(uri: &str, ctx: &DiceContext) -> McpResult<ReadResourceResult> {
        match uri.strip_prefix(templates::DICE_SCHEME) {
            Some(notation) => roll::read_roll(uri, notation, ctx),
            None => {
                tracing::warn!("Rejected resource read for {uri}");
                Err(McpError::UnknownResource(uri.to_string()))
            }
        }
    }
}
