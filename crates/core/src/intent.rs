use crate::catalog::IntentCatalog;
use crate::config::ChatConfig;
use crate::models::IntentId;

/// Lowercases, strips configured punctuation and trims. Never fails; input made
/// only of punctuation becomes an empty string.
pub fn normalize_input(raw: &str, config: &ChatConfig) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|ch| !config.is_punctuation(*ch))
        .collect::<String>()
        .trim()
        .to_string()
}

/// First-match-wins classification over the catalog's category order.
///
/// Triggers match as plain substrings, so short triggers also fire inside
/// longer words (`"this"` contains `"hi"`). A bare termination word always
/// classifies as farewell, before any substring scan.
pub fn classify_intent(catalog: &IntentCatalog, normalized: &str) -> Option<IntentId> {
    if catalog.is_termination_word(normalized) {
        return Some(IntentId::Farewell);
    }

    catalog
        .categories
        .iter()
        .find(|category| category.first_matching_trigger(normalized).is_some())
        .map(|category| category.id)
}

/// Returns the capitalized name when `raw` reads as a bare name declaration:
/// one whitespace-delimited token of alphabetic characters that is not a
/// termination word.
pub fn detect_name_declaration(catalog: &IntentCatalog, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut tokens = trimmed.split_whitespace();
    let token = tokens.next()?;
    if tokens.next().is_some() || !token.chars().all(char::is_alphabetic) {
        return None;
    }

    if catalog.is_termination_word(&token.to_lowercase()) {
        return None;
    }

    Some(capitalize(token))
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
