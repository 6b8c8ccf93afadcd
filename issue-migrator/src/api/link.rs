//! `Link` header parsing.
//!
//! GitHub advertises further pages with a header of the form
//! `<https://...&page=2>; rel="next", <https://...&page=5>; rel="last"`.

/// One `<url>; rel="..."` entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link<'a> {
    /// Target URL, without the angle brackets.
    pub url: &'a str,

    /// Relation types. A single entry may declare several, space separated.
    pub rels: Vec<&'a str>,
}

impl Link<'_> {
    /// Returns true if the entry declares the given relation type.
    #[must_use]
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }
}

/// Parses every entry of a `Link` header value.
///
/// Malformed entries are skipped. URLs are taken verbatim from between the
/// angle brackets, so commas inside a URL do not split it.
pub fn parse_link_header(value: &str) -> Vec<Link<'_>> {
    let mut links = Vec::new();
    let mut rest = value;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };

        let url = after_open[..close].trim();
        let tail = &after_open[close + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());
        let params = tail[..params_end].trim().trim_end_matches(',');

        links.push(Link {
            url,
            rels: parse_rels(params),
        });
        rest = &tail[params_end..];
    }

    links
}

/// Returns the URL of the `rel="next"` entry, if any.
pub fn next_link(value: &str) -> Option<String> {
    parse_link_header(value)
        .into_iter()
        .find(|link| link.has_rel("next"))
        .map(|link| link.url.to_string())
}

fn parse_rels(params: &str) -> Vec<&str> {
    params
        .split(';')
        .filter_map(|param| param.split_once('='))
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case("rel"))
        .flat_map(|(_, value)| {
            value
                .trim()
                .trim_end_matches(',')
                .trim_matches('"')
                .split_whitespace()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GITHUB_LINK: &str = "<https://api.github.com/repositories/1/issues?state=all&page=2>; rel=\"next\", <https://api.github.com/repositories/1/issues?state=all&page=5>; rel=\"last\"";

    #[test]
    fn parses_all_entries() {
        let links = parse_link_header(GITHUB_LINK);

        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0].url,
            "https://api.github.com/repositories/1/issues?state=all&page=2"
        );
        assert_eq!(links[0].rels, vec!["next"]);
        assert_eq!(links[1].rels, vec!["last"]);
    }

    #[test]
    fn finds_next_url() {
        assert_eq!(
            next_link(GITHUB_LINK).as_deref(),
            Some("https://api.github.com/repositories/1/issues?state=all&page=2")
        );
    }

    #[test]
    fn no_next_on_last_page() {
        let value = "<https://example.com/x?page=1>; rel=\"prev\", <https://example.com/x?page=1>; rel=\"first\"";
        assert_eq!(next_link(value), None);
    }

    #[test]
    fn next_may_be_listed_last() {
        let value = "<https://example.com/x?page=1>; rel=\"first\", <https://example.com/x?page=3>; rel=\"next\"";
        assert_eq!(next_link(value).as_deref(), Some("https://example.com/x?page=3"));
    }

    #[test]
    fn handles_multiple_rels_and_unquoted_values() {
        let links = parse_link_header("<https://example.com/a>; rel=\"next last\", <https://example.com/b>; rel=prev");

        assert!(links[0].has_rel("next"));
        assert!(links[0].has_rel("last"));
        assert_eq!(links[1].rels, vec!["prev"]);
    }

    #[test]
    fn keeps_commas_inside_urls() {
        let value = "<https://example.com/x?labels=a,b&page=2>; rel=\"next\"";
        assert_eq!(
            next_link(value).as_deref(),
            Some("https://example.com/x?labels=a,b&page=2")
        );
    }

    #[test]
    fn ignores_garbage() {
        assert!(parse_link_header("").is_empty());
        assert!(parse_link_header("<unterminated; rel=\"next\"").is_empty());
        assert_eq!(next_link("not a link header"), None);
    }
}
