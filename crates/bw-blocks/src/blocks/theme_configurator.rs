//! Theme configurator: houses `css-variable` rows for display.
//!
//! Reading the variables and applying them to the page is the theme
//! resolver's job; this block only tags and wraps its content.

use bw_dom::{Document, NodeId, read_block_config};

use crate::context::DecorateContext;
use crate::decorator::{BlockDecorator, DecorateError, has_child_with_class};

const NAME: &str = "theme-configurator";
const VARIABLES_CLASS: &str = "theme-configurator-variables";

/// `theme-configurator` block.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThemeConfigurator;

impl BlockDecorator for ThemeConfigurator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_decorated(&self, doc: &Document, block: NodeId) -> bool {
        has_child_with_class(doc, block, VARIABLES_CLASS)
    }

    fn decorate(
        &self,
        doc: &mut Document,
        block: NodeId,
        _ctx: &mut DecorateContext,
    ) -> Result<(), DecorateError> {
        let config = read_block_config(doc, block);
        if let Some(id) = config.text("id").filter(|id| !id.is_empty()) {
            doc.set_attr(block, "id", id);
        }

        let variables = doc.create_element("div");
        doc.add_class(variables, VARIABLES_CLASS);
        doc.move_children(block, variables);
        doc.append(block, variables);
        Ok(())
    }
}
