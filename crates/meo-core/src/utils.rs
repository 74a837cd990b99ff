/// Convert PascalCase or camelCase to snake_case.
///
/// Runs of capitals stay together (`ASTNode` becomes `ast_node`), which is
/// how node names are derived from Rust type names.
///
/// # Examples
/// ```
/// use meo_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("ExpList"), "exp_list");
/// assert_eq!(to_snake_case("ASTNode"), "ast_node");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev_lower = i > 0 && !chars[i - 1].is_ascii_uppercase() && chars[i - 1] != '_';
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_ascii_uppercase();
            if i > 0 && !result.ends_with('_') && (prev_lower || (prev_upper && next_lower)) {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Shorten `text` to at most `max` characters, replacing the tail with `…`.
/// Newlines and tabs are shown escaped so the result fits on one line.
pub fn truncate_text(text: &str, max: usize) -> String {
    let escaped: String = text
        .chars()
        .flat_map(|c| match c {
            '\n' => vec!['\\', 'n'],
            '\t' => vec!['\\', 't'],
            '\r' => vec!['\\', 'r'],
            c => vec![c],
        })
        .collect();

    if escaped.chars().count() <= max {
        return escaped;
    }
    let keep = max.saturating_sub(1);
    let mut out: String = escaped.chars().take(keep).collect();
    out.push('…');
    out
}
