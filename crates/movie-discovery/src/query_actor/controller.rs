//! [`ViewModel`] implementation for the search view.
//!
//! See [`QueryController`] for the state it owns and how each intent changes it.

use crate::gateway::{FetchError, FetchGateway};
use crate::model::{Movie, PageNumber, UrlParams, ViewSnapshot, ViewStatus};
use crate::query_actor::{MemoryHistory, QueryError, QueryIntent};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use view_actor::{Debouncer, ViewClient, ViewModel};

/// Dependencies injected when the controller's loop starts.
///
/// `mailbox` is a clone of the controller's own client: timers and fetch tasks use it to
/// post their completions back as intents.
#[derive(Clone)]
pub struct ControllerContext {
    pub gateway: Arc<FetchGateway>,
    pub mailbox: ViewClient<QueryController>,
}

/// Canonical search state and its reconciliation with the URL.
///
/// - `search` is the literal search box text.
/// - `query` is the debounced text; fetches and the URL use it.
/// - `page` never drops below 1.
///
/// Typing only updates `search` and restarts the debounce window. When the window closes,
/// `query` takes the typed text, the page resets to 1, the URL entry is replaced and one
/// fetch goes out. Paging pushes a new URL entry. URL changes coming from navigation are
/// adopted without writing back.
pub struct QueryController {
    search: String,
    query: String,
    page: PageNumber,
    history: MemoryHistory,
    debouncer: Debouncer,
    latest_token: u64,
    fetches_issued: u64,
    status: ViewStatus,
}

impl QueryController {
    /// Seeds search text, debounced query and page from the initial URL.
    pub fn new(initial: UrlParams, debounce: Duration) -> Self {
        Self {
            search: initial.query.clone(),
            query: initial.query.clone(),
            page: initial.page,
            history: MemoryHistory::new(initial),
            debouncer: Debouncer::new(debounce),
            latest_token: 0,
            fetches_issued: 0,
            status: ViewStatus::Idle,
        }
    }

    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    fn url_params(&self) -> UrlParams {
        UrlParams {
            query: self.query.clone(),
            page: self.page,
        }
    }

    fn on_input(&mut self, text: String, ctx: &ControllerContext) {
        self.search = text;
        let mailbox = ctx.mailbox.clone();
        let generation = self.debouncer.schedule(move |generation| async move {
            if let Err(e) = mailbox.notify(QueryIntent::DebounceSettled { generation }).await {
                debug!(error = %e, "Controller gone before debounce settled");
            }
        });
        debug!(search = %self.search, generation, "Input");
    }

    fn on_debounce_settled(&mut self, generation: u64, ctx: &ControllerContext) {
        if !self.debouncer.settle(generation) {
            return;
        }
        if self.search == self.query {
            debug!(query = %self.query, "Settled text unchanged");
            return;
        }

        self.query = self.search.clone();
        self.page = PageNumber::FIRST;
        self.history.replace(self.url_params());
        info!(query = %self.query, "Search settled");
        self.issue_fetch(ctx);
    }

    fn on_page_change(&mut self, delta: i64, ctx: &ControllerContext) {
        let page = self.page.offset(delta);
        if page == self.page {
            debug!(page = page.get(), delta, "Page unchanged");
            return;
        }

        self.page = page;
        self.history.push(self.url_params());
        info!(page = page.get(), "Page changed");
        self.issue_fetch(ctx);
    }

    fn on_url_external_change(&mut self, params: UrlParams, ctx: &ControllerContext) {
        if params.page == self.page && params.query == self.search {
            debug!(url = %params, "URL already matches state");
            return;
        }

        // Pending typing never outlives a navigation, even one back to the settled state
        self.debouncer.cancel();
        let moved = params.page != self.page || params.query != self.query;
        self.search = params.query.clone();
        self.query = params.query;
        self.page = params.page;
        if !moved {
            debug!(query = %self.query, "Discarded typing, URL matches settled query");
            return;
        }
        info!(query = %self.query, page = self.page.get(), "Adopted URL");
        self.issue_fetch(ctx);
    }

    fn on_fetch_settled(&mut self, token: u64, outcome: Result<Vec<Movie>, FetchError>) {
        if token != self.latest_token {
            debug!(token, latest = self.latest_token, "Discarding stale fetch result");
            return;
        }

        self.status = match outcome {
            Ok(movies) => {
                info!(token, count = movies.len(), "Results applied");
                ViewStatus::Loaded(movies)
            }
            Err(e) => {
                warn!(token, error = %e, "Fetch failed");
                ViewStatus::Failed(e.user_message())
            }
        };
    }

    /// Starts one fetch for the current `(query, page)`. Only its completion will be applied.
    fn issue_fetch(&mut self, ctx: &ControllerContext) {
        self.latest_token += 1;
        self.fetches_issued += 1;
        self.status = ViewStatus::Loading;

        let token = self.latest_token;
        let query = self.query.clone();
        let page = self.page;
        let gateway = ctx.gateway.clone();
        let mailbox = ctx.mailbox.clone();
        debug!(token, query = %query, page = page.get(), "Issuing fetch");

        tokio::spawn(async move {
            let outcome = gateway.fetch(&query, page).await;
            if let Err(e) = mailbox.notify(QueryIntent::FetchSettled { token, outcome }).await {
                debug!(token, error = %e, "Controller gone before fetch settled");
            }
        });
    }
}

#[async_trait]
impl ViewModel for QueryController {
    type Intent = QueryIntent;
    type Snapshot = ViewSnapshot;
    type Context = ControllerContext;
    type Error = QueryError;

    async fn on_start(&mut self, ctx: &ControllerContext) -> Result<(), QueryError> {
        info!(query = %self.query, page = self.page.get(), "Initial load");
        self.issue_fetch(ctx);
        Ok(())
    }

    async fn handle_intent(
        &mut self,
        intent: QueryIntent,
        ctx: &ControllerContext,
    ) -> Result<(), QueryError> {
        match intent {
            QueryIntent::Input(text) => self.on_input(text, ctx),
            QueryIntent::DebounceSettled { generation } => self.on_debounce_settled(generation, ctx),
            QueryIntent::ChangePage(delta) => self.on_page_change(delta, ctx),
            QueryIntent::FetchSettled { token, outcome } => self.on_fetch_settled(token, outcome),
            QueryIntent::Back => {
                let params = self.history.back().cloned().ok_or(QueryError::NoHistoryEntry)?;
                self.on_url_external_change(params, ctx);
            }
            QueryIntent::Forward => {
                let params = self
                    .history
                    .forward()
                    .cloned()
                    .ok_or(QueryError::NoHistoryEntry)?;
                self.on_url_external_change(params, ctx);
            }
            QueryIntent::Open(url) => {
                let params = self.history.open(UrlParams::parse(&url)).clone();
                self.on_url_external_change(params, ctx);
            }
            QueryIntent::UrlChanged(params) => {
                self.history.observe(params.clone());
                self.on_url_external_change(params, ctx);
            }
        }
        Ok(())
    }

    async fn on_stop(&mut self, _ctx: &ControllerContext) {
        self.debouncer.cancel();
        info!(fetches = self.fetches_issued, "Controller stopped");
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            search: self.search.clone(),
            query: self.query.clone(),
            page: self.page,
            url: self.history.current().to_query_string(),
            status: self.status.clone(),
            debounce_pending: self.debouncer.is_pending(),
            fetches_issued: self.fetches_issued,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::gateway::mock::MockTransport;
    use crate::query_actor::UrlWrite;
    use tokio::sync::mpsc;
    use view_actor::mock::create_mock_client;
    use view_actor::ViewRequest;

    type Mailbox = mpsc::Receiver<ViewRequest<QueryController>>;

    fn setup(initial: &str) -> (QueryController, ControllerContext, Mailbox, MockTransport) {
        let transport = MockTransport::new();
        let gateway = FetchGateway::new(
            GatewayConfig::new("https://api.example/3", "key"),
            Arc::new(transport.clone()),
        );
        let (mailbox, receiver) = create_mock_client::<QueryController>(16);
        let ctx = ControllerContext {
            gateway: Arc::new(gateway),
            mailbox,
        };
        let controller = QueryController::new(UrlParams::parse(initial), Duration::from_millis(500));
        (controller, ctx, receiver, transport)
    }

    async fn next_notified(receiver: &mut Mailbox) -> QueryIntent {
        match receiver.recv().await {
            Some(ViewRequest::Notify { intent }) => intent,
            _ => panic!("Expected a Notify request"),
        }
    }

    #[tokio::test]
    async fn test_initial_load_seeds_from_url_without_writing() {
        let (mut controller, ctx, mut receiver, transport) = setup("?query=batman&page=3");
        controller.on_start(&ctx).await.unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.search, "batman");
        assert_eq!(snapshot.query, "batman");
        assert_eq!(snapshot.page.get(), 3);
        assert!(snapshot.status.is_loading());
        assert!(controller.history().writes().is_empty());

        let settled = next_notified(&mut receiver).await;
        assert!(matches!(settled, QueryIntent::FetchSettled { token: 1, .. }));
        assert_eq!(
            transport.urls(),
            vec!["https://api.example/3/search/movie?query=batman&page=3"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_replaces_url_and_resets_page() {
        let (mut controller, ctx, mut receiver, _transport) = setup("?page=4");

        controller
            .handle_intent(QueryIntent::Input("alien".into()), &ctx)
            .await
            .unwrap();
        assert!(controller.snapshot().debounce_pending);
        assert_eq!(controller.snapshot().query, "");

        let settled = next_notified(&mut receiver).await;
        controller.handle_intent(settled, &ctx).await.unwrap();

        let snapshot = controller.snapshot();
        assert!(!snapshot.debounce_pending);
        assert_eq!(snapshot.query, "alien");
        assert_eq!(snapshot.page, PageNumber::FIRST);
        assert_eq!(snapshot.url, "query=alien&page=1");
        assert_eq!(
            controller.history().writes(),
            &[(UrlWrite::Replace, UrlParams::new("alien", 1))]
        );
        assert_eq!(snapshot.fetches_issued, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_with_unchanged_text_does_nothing() {
        let (mut controller, ctx, mut receiver, _transport) = setup("?query=heat&page=2");

        controller
            .handle_intent(QueryIntent::Input("heat".into()), &ctx)
            .await
            .unwrap();
        let settled = next_notified(&mut receiver).await;
        controller.handle_intent(settled, &ctx).await.unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.page.get(), 2);
        assert_eq!(snapshot.fetches_issued, 0);
        assert!(controller.history().writes().is_empty());
    }

    #[tokio::test]
    async fn test_page_change_pushes_and_clamps() {
        let (mut controller, ctx, _receiver, _transport) = setup("");

        controller
            .handle_intent(QueryIntent::ChangePage(-1), &ctx)
            .await
            .unwrap();
        assert_eq!(controller.snapshot().page, PageNumber::FIRST);
        assert_eq!(controller.snapshot().fetches_issued, 0);

        controller
            .handle_intent(QueryIntent::ChangePage(1), &ctx)
            .await
            .unwrap();
        assert_eq!(controller.snapshot().page.get(), 2);
        assert_eq!(controller.snapshot().url, "page=2");
        assert_eq!(
            controller.history().writes(),
            &[(UrlWrite::Push, UrlParams::new("", 2))]
        );
        assert_eq!(controller.history().len(), 2);
    }

    #[tokio::test]
    async fn test_url_change_matching_state_is_ignored() {
        let (mut controller, ctx, _receiver, _transport) = setup("?query=up&page=2");

        controller
            .handle_intent(QueryIntent::UrlChanged(UrlParams::new("up", 2)), &ctx)
            .await
            .unwrap();

        assert_eq!(controller.snapshot().fetches_issued, 0);
        assert!(controller.history().writes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_url_change_cancels_pending_debounce() {
        let (mut controller, ctx, mut receiver, _transport) = setup("");

        controller
            .handle_intent(QueryIntent::Input("draft".into()), &ctx)
            .await
            .unwrap();
        controller
            .handle_intent(QueryIntent::UrlChanged(UrlParams::new("jaws", 5)), &ctx)
            .await
            .unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.search, "jaws");
        assert_eq!(snapshot.query, "jaws");
        assert_eq!(snapshot.page.get(), 5);
        assert!(!snapshot.debounce_pending);
        assert_eq!(snapshot.fetches_issued, 1);
        assert!(controller.history().writes().is_empty());

        // Only the fetch completes; the cancelled timer never reports
        let settled = next_notified(&mut receiver).await;
        assert!(matches!(settled, QueryIntent::FetchSettled { .. }));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_url_back_to_settled_state_discards_typing() {
        let (mut controller, ctx, mut receiver, _transport) = setup("");

        controller
            .handle_intent(QueryIntent::Input("draft".into()), &ctx)
            .await
            .unwrap();
        controller
            .handle_intent(QueryIntent::UrlChanged(UrlParams::new("", 1)), &ctx)
            .await
            .unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.search, "");
        assert_eq!(snapshot.query, "");
        assert!(!snapshot.debounce_pending);
        assert_eq!(snapshot.fetches_issued, 0);
        assert!(controller.history().writes().is_empty());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_back_at_start_is_an_error() {
        let (mut controller, ctx, _receiver, _transport) = setup("");
        let err = controller
            .handle_intent(QueryIntent::Back, &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, QueryError::NoHistoryEntry);
        assert_eq!(controller.snapshot().fetches_issued, 0);
    }

    #[tokio::test]
    async fn test_only_latest_fetch_result_is_applied() {
        let (mut controller, ctx, _receiver, _transport) = setup("");
        controller.on_start(&ctx).await.unwrap();
        controller
            .handle_intent(QueryIntent::ChangePage(1), &ctx)
            .await
            .unwrap();

        let newest = vec![Movie::new(2, "Second", "en")];
        controller
            .handle_intent(
                QueryIntent::FetchSettled {
                    token: 2,
                    outcome: Ok(newest.clone()),
                },
                &ctx,
            )
            .await
            .unwrap();
        controller
            .handle_intent(
                QueryIntent::FetchSettled {
                    token: 1,
                    outcome: Ok(vec![Movie::new(1, "First", "en")]),
                },
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(controller.snapshot().status, ViewStatus::Loaded(newest));
    }

    #[tokio::test]
    async fn test_failure_replaces_results_with_message() {
        let (mut controller, ctx, _receiver, _transport) = setup("");
        controller.on_start(&ctx).await.unwrap();
        controller
            .handle_intent(
                QueryIntent::FetchSettled {
                    token: 1,
                    outcome: Err(FetchError::NetworkFailure("reset".into())),
                },
                &ctx,
            )
            .await
            .unwrap();

        let status = controller.snapshot().status;
        assert!(status.movies().is_empty());
        assert_eq!(status.error(), Some(crate::gateway::NETWORK_FAILURE_MESSAGE));
    }
}
