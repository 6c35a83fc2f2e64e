use async_trait::async_trait;
use std::time::Duration;
use view_actor::{Debouncer, ViewActor, ViewClient, ViewModel};

// --- Test Model: a text box that commits its value after a quiet window ---

struct TextBox {
    draft: String,
    committed: Vec<String>,
    debouncer: Debouncer,
}

#[derive(Debug)]
enum TextIntent {
    Type(String),
    Settled { generation: u64 },
}

#[derive(Debug, thiserror::Error)]
#[error("text box error")]
struct TextError;

#[derive(Clone, Debug, Default, PartialEq)]
struct TextSnapshot {
    draft: String,
    committed: Vec<String>,
}

#[async_trait]
impl ViewModel for TextBox {
    type Intent = TextIntent;
    type Snapshot = TextSnapshot;
    type Context = ViewClient<TextBox>;
    type Error = TextError;

    async fn handle_intent(
        &mut self,
        intent: TextIntent,
        mailbox: &ViewClient<TextBox>,
    ) -> Result<(), TextError> {
        match intent {
            TextIntent::Type(text) => {
                self.draft = text;
                let mailbox = mailbox.clone();
                self.debouncer.schedule(move |generation| async move {
                    let _ = mailbox.notify(TextIntent::Settled { generation }).await;
                });
            }
            TextIntent::Settled { generation } => {
                if self.debouncer.settle(generation) {
                    self.committed.push(self.draft.clone());
                }
            }
        }
        Ok(())
    }

    async fn on_stop(&mut self, _ctx: &ViewClient<TextBox>) {
        self.debouncer.cancel();
    }

    fn snapshot(&self) -> TextSnapshot {
        TextSnapshot {
            draft: self.draft.clone(),
            committed: self.committed.clone(),
        }
    }
}

fn start() -> (ViewClient<TextBox>, tokio::task::JoinHandle<()>) {
    let model = TextBox {
        draft: String::new(),
        committed: Vec::new(),
        debouncer: Debouncer::new(Duration::from_millis(500)),
    };
    let (actor, client) = ViewActor::new(model, 16);
    let handle = tokio::spawn(actor.run(client.clone()));
    (client, handle)
}

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_commits_only_last_value() {
    let (client, handle) = start();

    client.dispatch(TextIntent::Type("b".into())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    client.dispatch(TextIntent::Type("ba".into())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    client.dispatch(TextIntent::Type("bat".into())).await.unwrap();

    tokio::time::sleep(Duration::from_millis(600)).await;

    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.committed, vec!["bat"]);

    client.shutdown().await.unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_pauses_longer_than_window_commit_each_value() {
    let (client, handle) = start();

    client.dispatch(TextIntent::Type("first".into())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(700)).await;
    client.dispatch(TextIntent::Type("second".into())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(700)).await;

    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(snapshot.committed, vec!["first", "second"]);

    client.shutdown().await.unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_committed_value() {
    let (client, handle) = start();
    let mut watcher = client.subscribe();

    client.dispatch(TextIntent::Type("watch".into())).await.unwrap();
    let committed = loop {
        watcher.changed().await.unwrap();
        let snapshot = watcher.borrow_and_update().clone();
        if !snapshot.committed.is_empty() {
            break snapshot.committed;
        }
    };
    assert_eq!(committed, vec!["watch"]);

    client.shutdown().await.unwrap();
    handle.await.unwrap();
}
