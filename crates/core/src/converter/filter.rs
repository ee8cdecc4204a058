//! Keyword highlight Lua filter.

/// Character style applied to bold spans. Defined by the built-in template.
pub const KEYWORD_STYLE: &str = "KeywordHighlight";

/// File name the filter is written under in the scratch directory.
pub const FILTER_FILE_NAME: &str = "keyword-highlight.lua";

/// Renders the filter script.
///
/// Every `Strong` element is kept bold and wrapped in a span carrying the
/// [`KEYWORD_STYLE`] custom style, which the docx writer maps to a
/// character style.
pub fn highlight_filter() -> String {
    format!(
        r#"-- Wraps bold text in the {style} character style.
function Strong(el)
  return pandoc.Span({{ pandoc.Strong(el.content) }}, {{ ["custom-style"] = "{style}" }})
end
"#,
        style = KEYWORD_STYLE
    )
}
