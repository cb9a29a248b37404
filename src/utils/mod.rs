use regex::Regex;

/// Extract the `filename=` parameter from a Content-Disposition header value.
///
/// Handles both the quoted (`filename="clip.mp4"`) and unquoted
/// (`filename=clip.mp4`) forms; surrounding quotes are stripped. Returns
/// `None` when the parameter is absent or empty.
pub fn parse_disposition_filename(header_value: &str) -> Option<String> {
    let re = Regex::new(r#"filename\s*=\s*"?([^";]+)"?"#).ok()?;
    let caps = re.captures(header_value)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
