// String helpers shared by the loader (table names) and the synthesizer (keys)

pub fn pluralize_word(word: &str) -> String {
    if word.ends_with('y') && word.len() > 1 && !ends_with_vowel_y(word) {
        format!("{}ies", &word[..word.len() - 1])
    } else if word.ends_with('s') || word.ends_with("sh") || word.ends_with("ch") || word.ends_with('x') {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

fn ends_with_vowel_y(word: &str) -> bool {
    let mut chars = word.chars().rev().skip(1);
    matches!(chars.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

/// Underscore before every ASCII upper-case letter that follows another character,
/// then lower-case everything: `userProfile` -> `user_profile`.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Type name without its namespace: `App\Models\Post` -> `Post`
pub fn class_basename(type_name: &str) -> &str {
    let trimmed = type_name.trim_end_matches('\\');
    trimmed.rsplit('\\').next().unwrap_or(trimmed)
}

/// Conventional table name of a model class: `UserProfile` -> `user_profiles`
pub fn table_name_for(type_name: &str) -> String {
    pluralize_word(&to_snake_case(class_basename(type_name)))
}
