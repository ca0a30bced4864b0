//! Integration tests for the chat controller against a mock backend

mod test_utils;

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use easytrack::api::routes;
    use easytrack::chat::models::{GREETING, NO_REPLY_FALLBACK, error_reply};
    use easytrack::chat::{ChatController, ChatRole, ChatState, Completion, SubmitRejected};

    use crate::test_utils::{test_client, test_config};

    /// Tests a successful turn appends the assistant's reply
    #[tokio::test]
    async fn it_appends_assistant_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(json!({
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "assistant", "content": GREETING},
                    {"role": "user", "content": "Which areas reported water issues?"}
                ],
                "userId": "test-user",
                "context": {"userAgent": "easytrack-test"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Kisumu reported a broken borehole."}"#)
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let mut chat = ChatController::new(&test_config(&server));
        let completion = chat
            .send(&client, "Which areas reported water issues?")
            .await
            .unwrap();

        match completion {
            Completion::Applied(msg) => {
                assert_eq!(msg.role, ChatRole::Assistant);
                assert_eq!(msg.content, "Kisumu reported a broken borehole.");
            }
            Completion::Dropped => panic!("Reply should have been applied"),
        }
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.state(), ChatState::Idle);
        assert!(chat.quick_suggestions().is_empty());
        mock.assert_async().await;
    }

    /// Tests a reply without a message falls back to the apology
    #[tokio::test]
    async fn it_falls_back_when_message_missing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"status": "ok"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let mut chat = ChatController::new(&test_config(&server));
        chat.send(&client, "Hello").await.unwrap();
        assert_eq!(chat.transcript().last().unwrap().content, NO_REPLY_FALLBACK);
    }

    /// Tests a server error becomes a visible assistant message
    #[tokio::test]
    async fn it_reports_server_errors_in_transcript() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body(r#"{"error": "OpenAI quota exceeded"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let mut chat = ChatController::new(&test_config(&server));
        let before = chat.messages().len();
        chat.send(&client, "Summarize this week").await.unwrap();

        assert_eq!(chat.messages().len(), before + 2);
        assert_eq!(chat.state(), ChatState::Idle);
        assert_eq!(
            chat.transcript().last().unwrap().content,
            error_reply("OpenAI quota exceeded")
        );
    }

    /// Tests an unparsable error body still produces a reply
    #[tokio::test]
    async fn it_reports_generic_errors_in_transcript() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = test_client(&server);
        let mut chat = ChatController::new(&test_config(&server));
        chat.send(&client, "Hello").await.unwrap();
        assert_eq!(
            chat.transcript().last().unwrap().content,
            error_reply("API Error: 502")
        );
    }

    /// Tests the backend being unreachable is reported the same way
    #[tokio::test]
    async fn it_reports_unreachable_backend() {
        let server = mockito::Server::new_async().await;
        let mut config = test_config(&server);
        config.api_base_url = String::from("http://127.0.0.1:9");
        let client = easytrack::api::ApiClient::new(&config);

        let mut chat = ChatController::new(&config);
        chat.send(&client, "Hello").await.unwrap();

        assert_eq!(chat.messages().len(), 3);
        let last = chat.transcript().last().unwrap();
        assert!(last.content.starts_with("Sorry, I ran into a problem: Request failed"));
        assert_eq!(chat.state(), ChatState::Idle);
    }

    /// Tests only one request goes out while a response is pending
    #[tokio::test]
    async fn it_sends_one_request_at_a_time() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message": "Done"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server);
        let mut chat = ChatController::new(&test_config(&server));
        let pending = chat.submit("First").unwrap();
        let len = chat.messages().len();

        assert_eq!(chat.submit("Second").unwrap_err(), SubmitRejected::Busy);
        assert_eq!(chat.messages().len(), len);

        let result = routes::chat::send_message(&client, &pending.request).await;
        chat.complete(pending, result);
        assert_eq!(chat.messages().len(), len + 1);
        mock.assert_async().await;
    }

    /// Tests a reply arriving after the chat was cleared is dropped
    #[tokio::test]
    async fn it_drops_reply_after_clear() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message": "Late answer"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let mut chat = ChatController::new(&test_config(&server));
        let pending = chat.submit("Question").unwrap();
        let result = routes::chat::send_message(&client, &pending.request).await;

        chat.clear();
        assert_eq!(chat.complete(pending, result), Completion::Dropped);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].content, GREETING);
        assert_eq!(chat.state(), ChatState::Idle);
    }
}
