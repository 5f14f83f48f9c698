//! Help text rendering.
//!
//! Two forms exist: whole-program help (banner, usage line and one block per
//! option) and scoped help (only the blocks of options named before the help
//! token). Every line ends with `\n`; blocks are joined with an extra `\n`,
//! which leaves a blank line between them.

use crate::element::SchemaElement;
use crate::types::{HelpConfig, OptionType, ParserConfig};

/// Program name used in the usage line when the configuration has none.
const DEFAULT_PROGRAM: &str = "program";

/// Example shown for numeric options without an explicit example.
const DEFAULT_NUMBER_EXAMPLE: &str = "3";

/// Example shown for text-like options without an explicit example.
const DEFAULT_TEXT_EXAMPLE: &str = "\"exemple\"";

/// Renders the help block of one option.
///
/// # Examples
///
/// ```
/// use schema_args_core::{OptionSchema, OptionType, SchemaElement, render_element};
///
/// let element = SchemaElement::new("test", &OptionSchema::new(OptionType::Number));
/// assert_eq!(
///     render_element(&element, "="),
///     "|Name : --test\n|Type : number\n|Required : No\n|Example : --test=3\n"
/// );
/// ```
pub fn render_element(element: &SchemaElement, separator: &str) -> String {
    let mut out = format!("|Name : {}\n", element.name);
    if let Some(short) = &element.short {
        out.push_str(&format!("|Short : {short}\n"));
    }
    if let Some(desc) = &element.description {
        out.push_str(&format!("|Description : {desc}\n"));
    }
    out.push_str(&format!("|Type : {}\n", element.kind));
    out.push_str(&format!(
        "|Required : {}\n",
        if element.required { "Yes" } else { "No" }
    ));

    out.push_str(&format!("|Example : {}", element.name));
    if element.kind != OptionType::Boolean {
        let example = element.example.as_deref().unwrap_or(match element.kind {
            OptionType::Number => DEFAULT_NUMBER_EXAMPLE,
            _ => DEFAULT_TEXT_EXAMPLE,
        });
        out.push_str(separator);
        out.push_str(example);
    }
    out.push('\n');
    out
}

/// Renders the blocks of `elements` joined by a blank line.
pub fn render_scoped<'a>(
    elements: impl IntoIterator<Item = &'a SchemaElement>,
    separator: &str,
) -> String {
    elements
        .into_iter()
        .map(|element| render_element(element, separator))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders whole-program help: banner, usage and every option in declaration order.
///
/// Without a schema the usage line omits `[OPTION]` and no option list follows.
pub(crate) fn render_program(
    config: &ParserConfig,
    help: &HelpConfig,
    elements: Option<&[SchemaElement]>,
) -> String {
    let mut out = String::new();

    if let Some(name) = &config.name {
        out.push_str(&format!("Program : {name}\n"));
    }
    if let Some(desc) = &config.description {
        out.push_str(&format!("Description : {desc}\n"));
    }
    out.push_str(&format!("Separator : {}\n\n", config.separator));

    out.push_str(&format!("Help args : {}", help.name));
    if let Some(short) = &help.short {
        out.push_str(&format!(" & {short}"));
    }
    out.push_str("\n\n");

    let program = config.name.as_deref().unwrap_or(DEFAULT_PROGRAM);
    let mut usage = vec![program];
    if config.path {
        usage.push("[PATH]");
    }
    if elements.is_some() {
        usage.push("[OPTION]");
    }
    out.push_str(&format!("Usage : {}\n", usage.join(" ")));

    if let Some(elements) = elements {
        out.push_str("\nOption :\n");
        out.push_str(&render_scoped(elements, &config.separator));
    }

    out
}
