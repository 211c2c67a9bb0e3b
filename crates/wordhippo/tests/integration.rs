//! Integration tests for the thesaurus tool using wiremock

use wordhippo::{Extractor, FetchError, Tool, SIMPLIFY_FAILED};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HAPPY_PAGE: &str = r#"<html><body>
<div class="wordtype">Adjective</div>
<div class="tabdesc">Feeling or showing pleasure or contentment</div>
<div class="relatedwords">
  <table><tr>
    <td><a href="glad.html">glad</a></td>
    <td><a href="cheerful.html">cheerful</a></td>
  </tr></table>
</div>
<div class="wordtype">Related Words</div>
</body></html>"#;

const WORD_PATH: &str = "/what-is/another-word-for/happy.html";

async fn mount_robots(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(WORD_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

fn tool_for(server: &MockServer) -> Tool {
    Tool::builder()
        .base_url(server.uri())
        .user_agent("TestBot/1.0")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_lookup_with_empty_robots_txt() {
    let server = MockServer::start().await;
    mount_robots(&server, ResponseTemplate::new(200).set_body_string("")).await;
    mount_page(
        &server,
        ResponseTemplate::new(200).set_body_raw(HAPPY_PAGE, "text/html"),
    )
    .await;

    let resp = tool_for(&server).lookup("happy").await.unwrap();

    assert_eq!(resp.word, "happy");
    assert_eq!(resp.status_code, 200);
    assert!(resp.prefix.is_none());
    assert!(resp.content.contains("Adjective: Feeling or showing pleasure or contentment"));
    assert!(resp.content.contains("Synonyms:"));
    assert!(resp.content.contains("- glad"));
    assert!(resp.content.contains("- cheerful"));
    // The trailing "Related Words" marker has no description and is dropped
    assert!(!resp.content.contains("Related Words:"));
}

#[tokio::test]
async fn test_robots_403_denies_and_skips_content_fetch() {
    let server = MockServer::start().await;
    mount_robots(&server, ResponseTemplate::new(403)).await;

    Mock::given(method("GET"))
        .and(path(WORD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(HAPPY_PAGE, "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let result = tool_for(&server).lookup("happy").await;

    match result {
        Err(FetchError::RobotsDenied(msg)) => {
            assert!(msg.contains("robots.txt"));
            assert!(msg.contains("403"));
        }
        other => panic!("expected RobotsDenied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_robots_disallow_denies_with_diagnostics() {
    let server = MockServer::start().await;
    let robots = "User-agent: *\nDisallow: /what-is/";
    mount_robots(&server, ResponseTemplate::new(200).set_body_string(robots)).await;

    Mock::given(method("GET"))
        .and(path(WORD_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = tool_for(&server).lookup("happy").await;

    match result {
        Err(FetchError::RobotsDenied(msg)) => {
            assert!(msg.contains("<useragent>TestBot/1.0</useragent>"));
            assert!(msg.contains(WORD_PATH));
            assert!(msg.contains("Disallow: /what-is/"));
            assert!(msg.contains("must let the user know"));
        }
        other => panic!("expected RobotsDenied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_robots_404_is_permissive() {
    let server = MockServer::start().await;
    mount_robots(&server, ResponseTemplate::new(404)).await;
    mount_page(
        &server,
        ResponseTemplate::new(200).set_body_raw(HAPPY_PAGE, "text/html"),
    )
    .await;

    let resp = tool_for(&server).lookup("happy").await.unwrap();
    assert!(resp.content.contains("- glad"));
}

#[tokio::test]
async fn test_ignore_robots_txt_never_fetches_policy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .expect(0)
        .mount(&server)
        .await;
    mount_page(
        &server,
        ResponseTemplate::new(200).set_body_raw(HAPPY_PAGE, "text/html"),
    )
    .await;

    let tool = Tool::builder()
        .base_url(server.uri())
        .ignore_robots_txt(true)
        .build()
        .unwrap();

    let resp = tool.lookup("happy").await.unwrap();
    assert!(resp.content.contains("- cheerful"));
}

#[tokio::test]
async fn test_non_html_passes_through_with_prefix() {
    let server = MockServer::start().await;
    mount_robots(&server, ResponseTemplate::new(200).set_body_string("")).await;

    let body = "{\"word\": \"happy\"}";
    mount_page(
        &server,
        ResponseTemplate::new(200).set_body_raw(body, "application/json"),
    )
    .await;

    let resp = tool_for(&server).lookup("happy").await.unwrap();

    assert_eq!(resp.content, body);
    let prefix = resp.prefix.clone().expect("prefix should be set for non-HTML");
    assert!(prefix.contains("application/json"));
    assert!(prefix.contains("cannot be simplified"));
    assert!(resp.text().starts_with(&prefix));
}

#[tokio::test]
async fn test_content_error_status_is_fatal() {
    let server = MockServer::start().await;
    mount_robots(&server, ResponseTemplate::new(200).set_body_string("")).await;
    mount_page(&server, ResponseTemplate::new(500)).await;

    let result = tool_for(&server).lookup("happy").await;

    match result {
        Err(FetchError::Status { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.contains(WORD_PATH));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_readability_extractor_produces_markdown() {
    let server = MockServer::start().await;
    mount_robots(&server, ResponseTemplate::new(200).set_body_string("")).await;

    let article = r#"<html><head><title>Happy</title></head><body>
    <article>
      <h1>Happiness</h1>
      <p>Happiness is a state of well-being, a condition that shows up in
      everyday moments, in ordinary conversations, and in the small rituals
      that structure a day. It is one of the most studied topics in
      psychology, and researchers keep finding that it correlates with
      strong social ties, regular sleep, and a sense of purpose.</p>
      <p>Synonym lists, however useful, only scratch the surface of the
      concept, which is why definitions, examples, and context matter as
      much as the words themselves.</p>
      <p>Dictionaries and thesauruses, for their part, catalogue the many
      shades of the feeling, from contentment to delight, from cheer to
      outright joy.</p>
    </article>
    </body></html>"#;
    mount_page(
        &server,
        ResponseTemplate::new(200).set_body_raw(article, "text/html"),
    )
    .await;

    let tool = Tool::builder()
        .base_url(server.uri())
        .extractor(Extractor::Readability)
        .build()
        .unwrap();

    let resp = tool.lookup("happy").await.unwrap();
    assert_ne!(resp.content, SIMPLIFY_FAILED);
    assert!(resp.content.contains("state of well-being"));
}

#[tokio::test]
async fn test_user_agent_sent_on_both_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(WORD_PATH))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(HAPPY_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let resp = tool_for(&server).lookup("happy").await.unwrap();
    assert!(resp.content.contains("- glad"));
}

#[tokio::test]
async fn test_transport_failure_is_fatal() {
    // Port from a server that has been shut down; nothing is listening.
    // A non-pooled server is required: pooled servers keep listening
    // after the handle is dropped.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let tool = Tool::builder().base_url(uri).build().unwrap();
    let result = tool.lookup("happy").await;

    assert!(matches!(result, Err(FetchError::Transport { .. })));
}
