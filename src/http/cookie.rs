/// Look up one cookie in a `Cookie` header (`a=1; b=2`).
///
/// Pairs without `=` are skipped and double-quoted values are unquoted.
/// When a name repeats, the first occurrence wins.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_pairs(cookie_header)
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v)
}

fn cookie_pairs(cookie_header: &str) -> impl Iterator<Item = (&str, &str)> {
    cookie_header.split(';').filter_map(|part| {
        let (name, value) = part.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        Some((name, value))
    })
}
