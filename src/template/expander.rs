use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde::Serialize;

use super::text::title_case;
use crate::core::RachunekError;
use crate::i18n::Localizer;

/// Expands text templates against a data record.
///
/// Templates use handlebars syntax with two helpers:
/// `t "key"` translates into the localizer's active language and
/// `title value` capitalizes the first letter of every word, so
/// `{{title (t "dueDate")}}` renders as `Due Date`.
///
/// Rendering is strict: a placeholder naming a field the record does not
/// have is an error, not an empty string. Nothing is HTML-escaped.
pub struct TemplateExpander<'a> {
    registry: Handlebars<'a>,
}

impl<'a> TemplateExpander<'a> {
    pub fn new(localizer: &'a Localizer<'a>) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        registry.register_helper(
            "t",
            Box::new(
                move |h: &Helper,
                      _: &Handlebars,
                      _: &Context,
                      _: &mut RenderContext,
                      out: &mut dyn Output|
                      -> HelperResult {
                    let key = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .ok_or(RenderErrorReason::ParamNotFoundForIndex("t", 0))?;
                    out.write(&localizer.t(key))?;
                    Ok(())
                },
            ),
        );
        registry.register_helper("title", Box::new(title_helper));

        Self { registry }
    }

    /// Render `template` with `data` as the root context.
    pub fn expand<T: Serialize>(&self, template: &str, data: &T) -> Result<String, RachunekError> {
        self.registry
            .render_template(template, data)
            .map_err(|e| RachunekError::Template(e.to_string()))
    }
}

fn title_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("title", 0))?;
    out.write(&title_case(text))?;
    Ok(())
}
