//! Template patcher: normalize two callback invocations in view templates.
//!
//! Rules are tried in priority order and at most one is applied per
//! template. Both rewrites are fixed points, so patching twice changes
//! nothing beyond the first pass.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial implementation

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Which rule fired on a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePatch {
    /// `optionMenu();` rewritten in place (patch point for the menu).
    OptionMenu,
    /// `editAreaKeydown($event)` stripped to `editAreaKeydown()`.
    EditAreaKeydown,
}

impl TemplatePatch {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OptionMenu => "option_menu",
            Self::EditAreaKeydown => "edit_area_keydown",
        }
    }

    fn pattern(&self) -> &'static Regex {
        static OPTION_MENU: OnceLock<Regex> = OnceLock::new();
        static EDIT_AREA_KEYDOWN: OnceLock<Regex> = OnceLock::new();

        match self {
            Self::OptionMenu => OPTION_MENU
                .get_or_init(|| Regex::new(r"optionMenu\(\);").expect("valid pattern")),
            Self::EditAreaKeydown => EDIT_AREA_KEYDOWN
                .get_or_init(|| Regex::new(r"editAreaKeydown\(\$event\)").expect("valid pattern")),
        }
    }

    fn replacement(&self) -> &'static str {
        match self {
            Self::OptionMenu => "optionMenu();",
            Self::EditAreaKeydown => "editAreaKeydown()",
        }
    }
}

/// Priority order.
const RULES: [TemplatePatch; 2] = [TemplatePatch::OptionMenu, TemplatePatch::EditAreaKeydown];

/// Apply the first matching rule. Returns the text and the rule that fired.
pub fn patch_template(text: &str) -> (Cow<'_, str>, Option<TemplatePatch>) {
    for rule in RULES {
        let pattern = rule.pattern();
        if pattern.is_match(text) {
            tracing::debug!(rule = rule.name(), "patching template");
            return (pattern.replace_all(text, rule.replacement()), Some(rule));
        }
    }
    (Cow::Borrowed(text), None)
}

/// Patch a template string, returning it unchanged when no rule matches.
pub fn check_template_content(text: String) -> String {
    let patched = match patch_template(&text) {
        (Cow::Owned(patched), _) => Some(patched),
        (Cow::Borrowed(_), _) => None,
    };
    patched.unwrap_or(text)
}
