use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::api::ApiClient;
use crate::chat::{ChatController, ChatRole, Completion, SubmitRejected};
use crate::core::AppConfig;

const HELP: &str = "Commands: /clear starts over, /like toggles a like on the last reply, /quit exits";

fn print_suggestions(chat: &ChatController) {
    let suggestions = chat.quick_suggestions();
    if suggestions.is_empty() {
        return;
    }
    println!("Try asking:");
    for s in suggestions {
        println!("  - {}", s);
    }
}

fn remember(rl: &mut DefaultEditor, line: &str) {
    if let Err(err) = rl.add_history_entry(line) {
        tracing::warn!(error = %err, "Failed to record chat history");
    }
}

pub async fn run(config: &AppConfig, client: &ApiClient) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut chat = ChatController::new(config);

    println!("{}", chat.messages()[0].content);
    print_suggestions(&chat);
    println!("{}", HELP);

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                remember(&mut rl, &line);
                match line.trim() {
                    "/quit" => break,
                    "/clear" => {
                        chat.clear();
                        println!("{}", chat.messages()[0].content);
                        print_suggestions(&chat);
                        continue;
                    }
                    "/like" => {
                        let last_reply = chat
                            .messages()
                            .iter()
                            .rev()
                            .find(|m| m.role == ChatRole::Assistant)
                            .map(|m| m.id.clone());
                        if let Some(id) = last_reply {
                            chat.toggle_like(&id);
                            let liked = chat
                                .messages()
                                .iter()
                                .find(|m| m.id == id)
                                .and_then(|m| m.liked)
                                .unwrap_or(false);
                            println!("{}", if liked { "Liked" } else { "Unliked" });
                        }
                        continue;
                    }
                    _ => {}
                }

                match chat.send(client, &line).await {
                    Ok(Completion::Applied(msg)) => println!("{}", msg.content),
                    Ok(Completion::Dropped) => {}
                    Err(SubmitRejected::EmptyInput) => {}
                    Err(err) => println!("Error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    chat.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::History;

    #[test]
    fn it_records_chat_history() {
        let mut rl = DefaultEditor::new().unwrap();
        remember(&mut rl, "Which areas reported water issues?");
        remember(&mut rl, "/like");
        assert_eq!(rl.history().len(), 2);
    }
}
