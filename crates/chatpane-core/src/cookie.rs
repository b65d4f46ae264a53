use percent_encoding::percent_decode_str;

/// Look up a cookie by name in a `document.cookie` style string.
///
/// Values are URI-decoded. A value that does not decode to valid UTF-8 is
/// returned as stored.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    let prefix = format!("{}=", name);
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| match percent_decode_str(raw).decode_utf8() {
            Ok(decoded) => decoded.into_owned(),
            Err(e) => {
                log::warn!("Cookie {} is not valid percent-encoded UTF-8: {}", name, e);
                raw.to_string()
            }
        })
}
