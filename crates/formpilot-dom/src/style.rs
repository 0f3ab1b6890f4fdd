//! Computed style subset and inline style parsing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    #[default]
    Block,
    Inline,
    InlineBlock,
    None,
}

impl Display {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Display::None),
            "inline" | "contents" => Some(Display::Inline),
            "inline-block" | "inline-flex" | "inline-grid" => Some(Display::InlineBlock),
            "block" | "flex" | "grid" | "table" | "list-item" => Some(Display::Block),
            _ => None,
        }
    }

    /// Default display for a tag when no style says otherwise.
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "head" | "script" | "style" | "template" | "title" | "meta" | "link" => Display::None,
            "input" | "select" | "textarea" | "button" | "img" => Display::InlineBlock,
            "span" | "a" | "label" | "b" | "i" | "em" | "strong" | "small" | "abbr" | "code"
            | "sup" | "sub" | "u" => Display::Inline,
            _ => Display::Block,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// The style properties the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub display: Display,
    pub visibility: Visibility,
    pub opacity: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            visibility: Visibility::Visible,
            opacity: 1.0,
        }
    }
}

impl ComputedStyle {
    /// False for `display:none`, `visibility:hidden` or zero opacity.
    pub fn is_shown(&self) -> bool {
        self.display != Display::None && self.visibility != Visibility::Hidden && self.opacity > 0.0
    }
}

/// Declarations read from a `style` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InlineStyle {
    pub display: Option<Display>,
    pub visibility: Option<Visibility>,
    pub opacity: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl InlineStyle {
    /// Parse a `style` attribute. Unknown properties and values are ignored.
    pub fn parse(style: &str) -> Self {
        let mut parsed = InlineStyle::default();
        for declaration in style.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = value
                .trim()
                .trim_end_matches("!important")
                .trim()
                .to_ascii_lowercase();
            match name.as_str() {
                "display" => parsed.display = Display::parse(&value).or(parsed.display),
                "visibility" => {
                    parsed.visibility = match value.as_str() {
                        "hidden" | "collapse" => Some(Visibility::Hidden),
                        "visible" => Some(Visibility::Visible),
                        _ => parsed.visibility,
                    }
                }
                "opacity" => parsed.opacity = value.parse().ok().or(parsed.opacity),
                "width" => parsed.width = parse_px(&value).or(parsed.width),
                "height" => parsed.height = parse_px(&value).or(parsed.height),
                _ => {}
            }
        }
        parsed
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.strip_suffix("px").unwrap_or(value).trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_style() {
        let style = InlineStyle::parse("display: none; opacity:0.5; width: 12px; height:3");
        assert_eq!(style.display, Some(Display::None));
        assert_eq!(style.opacity, Some(0.5));
        assert_eq!(style.width, Some(12.0));
        assert_eq!(style.height, Some(3.0));
        assert_eq!(style.visibility, None);
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let style = InlineStyle::parse("color red; visibility: HIDDEN !important; width: auto");
        assert_eq!(style.visibility, Some(Visibility::Hidden));
        assert_eq!(style.width, None);
    }

    #[test]
    fn test_is_shown() {
        assert!(ComputedStyle::default().is_shown());
        let faded = ComputedStyle {
            opacity: 0.0,
            ..Default::default()
        };
        assert!(!faded.is_shown());
        let hidden = ComputedStyle {
            visibility: Visibility::Hidden,
            ..Default::default()
        };
        assert!(!hidden.is_shown());
    }

    #[test]
    fn test_display_for_tag() {
        assert_eq!(Display::for_tag("div"), Display::Block);
        assert_eq!(Display::for_tag("span"), Display::Inline);
        assert_eq!(Display::for_tag("input"), Display::InlineBlock);
        assert_eq!(Display::for_tag("script"), Display::None);
    }
}
