/// Characters that may not appear in a custom subdomain label.
const SUBDOMAIN_FORBIDDEN: &[char] = &[
    ' ', '~', '`', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '=', '+', '[', ']', '{', '}',
    ';', '"', '\'', '|', '<', '>', ',', '.', '?', '\r', '\n', '\t',
];

/// Registered as `subdomain`. Non-ASCII labels are allowed; punctuation,
/// whitespace and the 0x00-0x08 control range are not.
pub fn valid_subdomain(value: &str) -> bool {
    !value
        .chars()
        .any(|c| SUBDOMAIN_FORBIDDEN.contains(&c) || ('\u{0}'..='\u{8}').contains(&c))
}
