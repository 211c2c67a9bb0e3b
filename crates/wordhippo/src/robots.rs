//! robots.txt compliance checking
//!
//! Before a page is fetched autonomously, the site's robots.txt is
//! retrieved and evaluated against the configured user-agent. A 401 or
//! 403 on robots.txt itself is read conservatively as "do not fetch".

use crate::error::FetchError;
use reqwest::Client;
use robotstxt::DefaultMatcher;
use tracing::debug;
use url::Url;

/// Derive the robots.txt URL for a page URL
///
/// Keeps scheme, host and port; the path becomes `/robots.txt` and any
/// query or fragment is dropped.
pub fn robots_txt_url(url: &Url) -> Url {
    let mut robots = url.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    robots
}

/// Remove comment lines from robots.txt content
///
/// Some robots.txt parsers mishandle certain comment forms, so lines
/// whose trimmed form starts with `#` are dropped before parsing.
pub fn strip_comments(robots_txt: &str) -> String {
    robots_txt
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check whether `url` may be fetched autonomously by `user_agent`
///
/// Fetches the site's robots.txt with the same client (and therefore the
/// same user-agent and proxy) as the content fetch. Returns
/// [`FetchError::RobotsDenied`] if the policy forbids access, and
/// [`FetchError::Transport`] if robots.txt could not be retrieved at all.
pub async fn check_may_fetch(
    client: &Client,
    url: &Url,
    user_agent: &str,
) -> Result<(), FetchError> {
    let robots_url = robots_txt_url(url);

    let response =
        client
            .get(robots_url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: robots_url.to_string(),
                source,
            })?;

    let status = response.status().as_u16();
    if status == 401 || status == 403 {
        return Err(FetchError::RobotsDenied(format!(
            "When fetching robots.txt ({robots_url}), received status {status} so assuming \
             that autonomous fetching is not allowed."
        )));
    }
    if (400..500).contains(&status) {
        // No robots.txt at all means no restrictions apply
        debug!(%robots_url, status, "robots.txt unavailable, treating as permissive");
        return Ok(());
    }

    let robots_txt = response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            url: robots_url.to_string(),
            source,
        })?;

    let processed = strip_comments(&robots_txt);
    let mut matcher = DefaultMatcher::default();
    if !matcher.one_agent_allowed_by_robots(&processed, user_agent, url.as_str()) {
        return Err(FetchError::RobotsDenied(denial_message(
            &robots_url,
            user_agent,
            url,
            &robots_txt,
        )));
    }

    debug!(%url, user_agent, "robots.txt permits autonomous fetch");
    Ok(())
}

/// Build the caller-facing diagnostic for a robots.txt denial
fn denial_message(robots_url: &Url, user_agent: &str, url: &Url, robots_txt: &str) -> String {
    format!(
        "The site's robots.txt ({robots_url}) specifies that autonomous fetching of this page \
         is not allowed, \
         <useragent>{user_agent}</useragent>\n\
         <url>{url}</url>\
         <robots>\n{robots_txt}\n</robots>\n\
         The assistant must let the user know that it failed to view the page. The assistant \
         may provide further guidance based on the above information.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_txt_url_replaces_path() {
        let url = Url::parse("https://www.wordhippo.com/what-is/another-word-for/happy.html")
            .unwrap();
        assert_eq!(
            robots_txt_url(&url).as_str(),
            "https://www.wordhippo.com/robots.txt"
        );
    }

    #[test]
    fn test_robots_txt_url_drops_query_and_fragment() {
        let url = Url::parse("https://x.com/a/b?q=1#frag").unwrap();
        assert_eq!(robots_txt_url(&url).as_str(), "https://x.com/robots.txt");
    }

    #[test]
    fn test_robots_txt_url_keeps_port() {
        let url = Url::parse("http://127.0.0.1:8080/page.html").unwrap();
        assert_eq!(
            robots_txt_url(&url).as_str(),
            "http://127.0.0.1:8080/robots.txt"
        );
    }

    #[test]
    fn test_strip_comments() {
        let robots = "# banner\nUser-agent: *\n  # indented comment\nDisallow: /private";
        assert_eq!(
            strip_comments(robots),
            "User-agent: *\nDisallow: /private"
        );
    }

    #[test]
    fn test_strip_comments_idempotent() {
        let robots = "# a\nUser-agent: *\nDisallow: /x\n# b";
        let once = strip_comments(robots);
        assert_eq!(strip_comments(&once), once);
    }

    #[test]
    fn test_strip_comments_keeps_inline_hash() {
        // Only whole comment lines are removed
        let robots = "Disallow: /x # trailing";
        assert_eq!(strip_comments(robots), "Disallow: /x # trailing");
    }

    #[test]
    fn test_matcher_disallow() {
        let robots = "User-agent: *\nDisallow: /what-is/";
        assert!(!DefaultMatcher::default().one_agent_allowed_by_robots(
            robots,
            "TestBot",
            "https://www.wordhippo.com/what-is/another-word-for/happy.html"
        ));
        assert!(DefaultMatcher::default().one_agent_allowed_by_robots(
            robots,
            "TestBot",
            "https://www.wordhippo.com/about.html"
        ));
    }

    #[test]
    fn test_matcher_agent_specific_group() {
        let robots = "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /";
        assert!(!DefaultMatcher::default().one_agent_allowed_by_robots(
            robots,
            "BadBot",
            "https://x.com/page"
        ));
        assert!(DefaultMatcher::default().one_agent_allowed_by_robots(
            robots,
            "GoodBot",
            "https://x.com/page"
        ));
    }

    #[test]
    fn test_denial_message_contents() {
        let robots_url = Url::parse("https://x.com/robots.txt").unwrap();
        let url = Url::parse("https://x.com/page.html").unwrap();
        let msg = denial_message(&robots_url, "TestBot/1.0", &url, "User-agent: *\nDisallow: /");

        assert!(msg.contains("https://x.com/robots.txt"));
        assert!(msg.contains("<useragent>TestBot/1.0</useragent>"));
        assert!(msg.contains("<url>https://x.com/page.html</url>"));
        assert!(msg.contains("<robots>\nUser-agent: *\nDisallow: /\n</robots>"));
        assert!(msg.contains("must let the user know"));
    }
}
