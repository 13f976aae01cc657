//! Chat link normalization
//!
//! Links reach the host from the command line or the OS (`whatsapp://`
//! scheme, `wa.me` short links). Before a link is forwarded to the UI as an
//! `open-whatsapp-link` signal it is rewritten to a web client URL; anything
//! else is refused so the UI never navigates a tab off-site.

use url::Url;

pub const WEB_CLIENT_HOST: &str = "web.whatsapp.com";

/// Rewrite a chat link into a web client URL, or `None` if it is not one
pub fn normalize_chat_link(raw: &str) -> Option<Url> {
    let parsed = Url::parse(raw.trim()).ok()?;

    match (parsed.scheme(), parsed.host_str()) {
        ("whatsapp", _) => {
            // whatsapp://send?phone=... parses with "send" as the host
            let action = parsed
                .host_str()
                .map(str::to_string)
                .unwrap_or_else(|| parsed.path().trim_start_matches('/').to_string());
            let mut url = web_client_url(&action)?;
            url.set_query(parsed.query());
            Some(url)
        }
        ("https", Some(WEB_CLIENT_HOST)) => Some(parsed),
        ("https", Some("wa.me")) => {
            let phone = parsed.path().trim_matches('/');
            let mut url = web_client_url("send")?;
            {
                let mut query = url.query_pairs_mut();
                if !phone.is_empty() {
                    query.append_pair("phone", phone);
                }
                for (k, v) in parsed.query_pairs() {
                    query.append_pair(&k, &v);
                }
            }
            if url.query() == Some("") {
                url.set_query(None);
            }
            Some(url)
        }
        _ => None,
    }
}

fn web_client_url(path: &str) -> Option<Url> {
    Url::parse(&format!("https://{WEB_CLIENT_HOST}/{path}")).ok()
}

/// First argument that is a chat link
pub fn find_chat_link<I, S>(args: I) -> Option<Url>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .find_map(|arg| normalize_chat_link(arg.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_link() {
        let url = normalize_chat_link("whatsapp://send?phone=15551234567&text=hi").unwrap();
        assert_eq!(
            url.as_str(),
            "https://web.whatsapp.com/send?phone=15551234567&text=hi"
        );
    }

    #[test]
    fn test_short_link() {
        let url = normalize_chat_link("https://wa.me/15551234567?text=hello").unwrap();
        assert_eq!(
            url.as_str(),
            "https://web.whatsapp.com/send?phone=15551234567&text=hello"
        );
    }

    #[test]
    fn test_web_client_link_kept() {
        let raw = "https://web.whatsapp.com/send?phone=1";
        assert_eq!(normalize_chat_link(raw).unwrap().as_str(), raw);
    }

    #[test]
    fn test_foreign_links_refused() {
        assert!(normalize_chat_link("https://example.com/send?phone=1").is_none());
        assert!(normalize_chat_link("http://web.whatsapp.com").is_none());
        assert!(normalize_chat_link("not a url").is_none());
    }

    #[test]
    fn test_find_in_args() {
        let args = ["chatdeck", "--verbose", "whatsapp://send?phone=2"];
        assert_eq!(
            find_chat_link(args).unwrap().as_str(),
            "https://web.whatsapp.com/send?phone=2"
        );
        assert!(find_chat_link(["chatdeck"]).is_none());
    }
}
