// Class-based styling for selection components
//
// Components take a whitespace-separated class list (like "bold fg-cyan
// highlight") instead of a raw `Style`. Each token resolves against a
// `StyleSheet`:
// 1. Named classes defined in the sheet (built-ins + [classes] from config)
// 2. Utility tokens: fg-<color>, bg-<color>, bold, dim, italic, underlined,
//    reversed, crossed-out
// Unknown tokens are skipped.
//
// Styles are folded left to right with `Style::patch`, so later classes win.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Base class of every selection container
pub const SELECT_CLASS: &str = "select";
/// Base class of every selectable item
pub const OPTION_CLASS: &str = "option";
/// Modifier class applied to the active item
pub const OPTION_ACTIVE_CLASS: &str = "option-active";
/// Modifier class applied to every other item
pub const OPTION_INACTIVE_CLASS: &str = "option-inactive";
/// Base class of grouping nodes
pub const GROUP_CLASS: &str = "group";

/// Ordered list of style class tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    /// Split a class string on whitespace
    pub fn parse(classes: &str) -> Self {
        Self(classes.split_whitespace().map(str::to_string).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Append the tokens of `classes`
    pub fn extend(&mut self, classes: &ClassList) {
        self.0.extend(classes.0.iter().cloned());
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl From<&str> for ClassList {
    fn from(classes: &str) -> Self {
        Self::parse(classes)
    }
}

impl From<String> for ClassList {
    fn from(classes: String) -> Self {
        Self::parse(&classes)
    }
}

/// Named style classes
#[derive(Debug, Clone)]
pub struct StyleSheet {
    classes: HashMap<String, Style>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let mut sheet = Self::empty();
        sheet.insert(SELECT_CLASS, Style::default().fg(Color::Green));
        sheet.insert(OPTION_CLASS, Style::default());
        // State classes leave fg alone so caller colors show in both states
        sheet.insert(
            OPTION_ACTIVE_CLASS,
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        sheet.insert(
            OPTION_INACTIVE_CLASS,
            Style::default().add_modifier(Modifier::DIM),
        );
        sheet.insert(GROUP_CLASS, Style::default().fg(Color::Cyan));
        sheet
    }
}

impl StyleSheet {
    /// Sheet with no named classes; only utility tokens resolve
    pub fn empty() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Built-in sheet with `overrides` layered on top
    ///
    /// Each override value is itself a class string, resolved against the
    /// built-ins, so `highlight = "option-active underlined"` works.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut sheet = Self::default();
        // Sort for deterministic resolution order
        let mut names: Vec<_> = overrides.keys().collect();
        names.sort();
        for name in names {
            let style = sheet.resolve(&ClassList::parse(&overrides[name]));
            sheet.insert(name.clone(), style);
        }
        sheet
    }

    pub fn insert(&mut self, name: impl Into<String>, style: Style) {
        self.classes.insert(name.into(), style);
    }

    pub fn get(&self, name: &str) -> Option<Style> {
        self.classes.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Fold every token of `classes` into one style
    pub fn resolve(&self, classes: &ClassList) -> Style {
        classes
            .iter()
            .fold(Style::default(), |style, token| match self.token_style(token) {
                Some(next) => style.patch(next),
                None => {
                    tracing::trace!(class = token, "Unknown style class ignored");
                    style
                }
            })
    }

    /// Resolve a base class, the caller's classes, then a modifier class
    pub fn compose(&self, base: &str, classes: &ClassList, modifier: Option<&str>) -> Style {
        let mut list = ClassList::parse(base);
        list.extend(classes);
        if let Some(modifier) = modifier {
            list.extend(&ClassList::parse(modifier));
        }
        self.resolve(&list)
    }

    fn token_style(&self, token: &str) -> Option<Style> {
        self.get(token).or_else(|| parse_utility(token))
    }
}

/// Parse a single utility token
fn parse_utility(token: &str) -> Option<Style> {
    if let Some(color) = token.strip_prefix("fg-") {
        return parse_color(color).map(|c| Style::default().fg(c));
    }
    if let Some(color) = token.strip_prefix("bg-") {
        return parse_color(color).map(|c| Style::default().bg(c));
    }

    let modifier = match token {
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underlined" => Modifier::UNDERLINED,
        "reversed" => Modifier::REVERSED,
        "crossed-out" => Modifier::CROSSED_OUT,
        _ => return None,
    };
    Some(Style::default().add_modifier(modifier))
}

/// Parse a color name ("dark-gray", "lightblue"), "#rrggbb" or ANSI index
fn parse_color(value: &str) -> Option<Color> {
    if value.starts_with('#') {
        return Color::from_str(value).ok();
    }
    let normalized: String = value.chars().filter(|c| *c != '-' && *c != '_').collect();
    Color::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_parse() {
        let classes = ClassList::parse("  bold   fg-red\tunderlined ");
        assert_eq!(
            classes.iter().collect::<Vec<_>>(),
            vec!["bold", "fg-red", "underlined"]
        );
        assert_eq!(classes.to_string(), "bold fg-red underlined");
        assert!(ClassList::parse("   ").is_empty());
    }

    #[test]
    fn test_utility_tokens() {
        let sheet = StyleSheet::empty();
        let style = sheet.resolve(&"fg-red bg-dark-gray bold italic".into());
        assert_eq!(style.fg, Some(Color::Red));
        assert_eq!(style.bg, Some(Color::DarkGray));
        assert!(style.add_modifier.contains(Modifier::BOLD | Modifier::ITALIC));
    }

    #[test]
    fn test_hex_color() {
        let sheet = StyleSheet::empty();
        let style = sheet.resolve(&"bg-#102030".into());
        assert_eq!(style.bg, Some(Color::Rgb(0x10, 0x20, 0x30)));
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let sheet = StyleSheet::empty();
        let style = sheet.resolve(&"w-1/4 fg-notacolor bold".into());
        assert_eq!(style.fg, None);
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_later_classes_win() {
        let sheet = StyleSheet::empty();
        let style = sheet.resolve(&"fg-red fg-blue".into());
        assert_eq!(style.fg, Some(Color::Blue));
    }

    #[test]
    fn test_named_class_before_utility() {
        let mut sheet = StyleSheet::empty();
        sheet.insert("bold", Style::default().fg(Color::Yellow));
        let style = sheet.resolve(&"bold".into());
        assert_eq!(style.fg, Some(Color::Yellow));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_compose_applies_modifier_last() {
        let sheet = StyleSheet::default();
        let style = sheet.compose(OPTION_CLASS, &"bg-blue".into(), Some(OPTION_ACTIVE_CLASS));
        assert_eq!(style.bg, Some(Color::DarkGray));

        let style = sheet.compose(
            OPTION_CLASS,
            &"bg-blue fg-red".into(),
            Some(OPTION_INACTIVE_CLASS),
        );
        assert_eq!(style.bg, Some(Color::Blue));
        assert_eq!(style.fg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_overrides_resolve_against_builtins() {
        let mut overrides = HashMap::new();
        overrides.insert("highlight".to_string(), "option-active underlined".to_string());
        overrides.insert(SELECT_CLASS.to_string(), "fg-magenta".to_string());
        let sheet = StyleSheet::with_overrides(&overrides);

        let highlight = sheet.get("highlight").expect("highlight defined");
        assert_eq!(highlight.bg, Some(Color::DarkGray));
        assert!(highlight.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(sheet.get(SELECT_CLASS).and_then(|s| s.fg), Some(Color::Magenta));
    }
}
