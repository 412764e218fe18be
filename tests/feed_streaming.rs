//! End-to-end test in the shape of a feed view: subscribe to the home
//! timeline and the current account, refresh both, and render from the
//! streamed values.

use serde_json::json;
use tootkit::{TimelineHome, TootClient, TootClientConfig, TootData, VerifyCredentials};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_feed_view_round_trip() {
    let server = MockServer::start().await;

    let account = json!({
        "id": "1",
        "username": "dave",
        "acct": "dave@mastodon.example",
        "url": "https://mastodon.example/@dave",
        "display_name": "Dave",
        "note": "",
        "avatar": "https://mastodon.example/avatar.png",
        "header": "https://mastodon.example/header.png",
        "header_static": "https://mastodon.example/header.png",
        "locked": false,
        "created_at": "2022-11-06T08:00:00.000Z",
        "statuses_count": 4,
        "followers_count": 2,
        "following_count": 7
    });
    let timeline = json!([
        {
            "id": "101",
            "created_at": "2023-02-03T09:30:00.000Z",
            "account": account,
            "content": "<p>first</p>"
        },
        {
            "id": "102",
            "created_at": "2023-02-03T09:31:00.000Z",
            "account": account,
            "content": "<p>second</p>"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/v1/timelines/home"))
        .and(header("Authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&timeline))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/verify_credentials"))
        .and(header("Authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&account))
        .mount(&server)
        .await;

    let client =
        TootClient::new(TootClientConfig::new(server.uri()).with_access_token("token")).unwrap();
    let data = TootData::new(client);

    // Opt into updates before triggering the first refresh.
    let mut posts = data.stream(TimelineHome);
    let mut profile = data.stream(VerifyCredentials);

    data.refresh(TimelineHome).await.unwrap();
    data.refresh(VerifyCredentials).await.unwrap();

    let batch = posts.recv().await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].content.as_deref(), Some("<p>first</p>"));

    let me = profile.recv().await.unwrap();
    assert_eq!(me.display_name.as_deref(), Some("Dave"));
}
