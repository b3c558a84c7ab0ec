//! The controller for the page that displays an account's transactions.
//!
//! The controller fetches the account and its transactions through the
//! injected services, writes them into the regions of a [PageRoot], and
//! handles the delete controls through a single click listener on the root.
//!
//! Every render gets a new generation number. Completions carry the
//! generation they were started with and are dropped if the page has since
//! rendered something else or been cleared, so a slow response for an old
//! account never overwrites a newer one.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, Weak,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;

use crate::{AccountService, AppShell, ClientConfig, Confirm, Error, PageRoot, page::ClickEvent};

use super::{
    models::RenderOptions,
    service::TransactionService,
    view::{
        REMOVE_ACCOUNT_CLASS, REMOVE_TRANSACTION_CLASS, TITLE_PLACEHOLDER, TRANSACTION_ID_DATA,
        transactions_view,
    },
};

const REMOVE_ACCOUNT_PROMPT: &str = "Do you really want to delete this account?";
const REMOVE_TRANSACTION_PROMPT: &str = "Do you really want to delete this transaction?";

/// The collaborators a [TransactionsPage] needs.
#[derive(Clone)]
pub struct PageServices {
    /// Looks up and deletes accounts.
    pub accounts: Arc<dyn AccountService>,
    /// Lists and deletes transactions.
    pub transactions: Arc<dyn TransactionService>,
    /// Refreshes the rest of the application after a deletion.
    pub app: Arc<dyn AppShell>,
    /// Asks the user before anything is deleted.
    pub confirm: Arc<dyn Confirm>,
}

/// Manages the page that shows the transactions of one account.
///
/// Cloning the page gives another handle to the same controller.
#[derive(Clone)]
pub struct TransactionsPage {
    inner: Arc<Inner>,
}

struct Inner {
    root: Arc<PageRoot>,
    services: PageServices,
    config: ClientConfig,
    /// The options of the last render, `None` before the first render and after a clear.
    last_options: Mutex<Option<RenderOptions>>,
    generation: AtomicU64,
    in_flight: Arc<watch::Sender<usize>>,
}

/// Counts a request as in flight until dropped.
struct InFlight(Arc<watch::Sender<usize>>);

impl InFlight {
    fn start(counter: &Arc<watch::Sender<usize>>) -> Self {
        counter.send_modify(|count| *count += 1);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.send_modify(|count| *count -= 1);
    }
}

impl TransactionsPage {
    /// Create the controller for the page section `root` and register its
    /// click listener on the root.
    ///
    /// # Errors
    /// Returns [Error::InvalidArgument] if `root` is `None`. Nothing is
    /// registered in that case.
    pub fn new(
        root: Option<Arc<PageRoot>>,
        services: PageServices,
        config: ClientConfig,
    ) -> Result<Self, Error> {
        let root = root.ok_or_else(|| {
            Error::InvalidArgument("the transactions page needs a root element".to_owned())
        })?;
        let (in_flight, _) = watch::channel(0);

        let inner = Arc::new(Inner {
            root,
            services,
            config,
            last_options: Mutex::new(None),
            generation: AtomicU64::new(0),
            in_flight: Arc::new(in_flight),
        });

        let page = Arc::downgrade(&inner);
        inner.root.add_click_listener(Box::new(move |event| {
            if let Some(page) = page.upgrade() {
                page.handle_click(event);
            }
        }));

        Ok(Self { inner })
    }

    /// The root element the page renders into.
    pub fn root(&self) -> &Arc<PageRoot> {
        &self.inner.root
    }

    /// The options of the last render, if any.
    pub fn last_options(&self) -> Option<RenderOptions> {
        self.inner.last_options().clone()
    }

    /// Render the page again with the options of the last render.
    ///
    /// Does nothing if the page has not been rendered yet.
    pub fn update(&self) {
        let options = self.last_options();
        self.inner.render(options);
    }

    /// Show the account and transactions selected by `options`.
    ///
    /// Does nothing if `options` is `None` or selects no account. Otherwise the
    /// account and its transactions are fetched concurrently and each is
    /// written into its region of the page as soon as it arrives.
    pub fn render(&self, options: Option<RenderOptions>) {
        self.inner.render(options);
    }

    /// Empty the transaction list, reset the title, and forget the last options.
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Delete the account currently shown, after the user confirms.
    ///
    /// The page is cleared once the account is deleted. The application's
    /// widgets are refreshed whether or not the deletion succeeded.
    pub fn remove_account(&self) {
        self.inner.remove_account();
    }

    /// Delete the transaction `id`, after the user confirms.
    ///
    /// The application is refreshed once the transaction is deleted.
    pub fn remove_transaction(&self, id: &str) {
        self.inner.remove_transaction(id);
    }

    /// Wait until no request started by this page is in flight.
    pub async fn settled(&self) {
        let mut receiver = self.inner.in_flight.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = receiver.wait_for(|count| *count == 0).await;
    }

    /// Detach the page's root. Responses that arrive afterwards are discarded
    /// and later renders fetch nothing.
    pub fn destroy(&self) {
        tracing::debug!("Destroying transactions page");
        self.inner.root.detach();
    }
}

impl Inner {
    fn last_options(&self) -> MutexGuard<'_, Option<RenderOptions>> {
        self.last_options.lock().unwrap_or_else(|error| {
            tracing::error!("last options lock was poisoned, recovering");
            PoisonError::into_inner(error)
        })
    }

    /// Start a new generation, invalidating all in-flight completions.
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn shows_account(&self, account_id: &str) -> bool {
        self.last_options()
            .as_ref()
            .is_some_and(|options| options.account_id == account_id)
    }

    fn render(self: &Arc<Self>, options: Option<RenderOptions>) {
        let Some(options) = options.filter(|options| !options.is_empty()) else {
            tracing::debug!("Nothing to render, no account selected");
            return;
        };

        if self.root.is_detached() {
            tracing::debug!("Not rendering account {} on a destroyed page", options.account_id);
            return;
        }

        *self.last_options() = Some(options.clone());
        let generation = self.next_generation();
        tracing::debug!(
            "Rendering transactions for account {} (generation {generation})",
            options.account_id
        );

        let page = Arc::downgrade(self);
        let in_flight = InFlight::start(&self.in_flight);
        let account_id = options.account_id.clone();
        self.services.accounts.get(
            &options.account_id,
            Box::new(move |result| {
                let _in_flight = in_flight;
                let Some(page) = current_page(&page, generation) else {
                    return;
                };

                match result {
                    Ok(account) => {
                        page.root.set_title_text(&account.name);
                    }
                    Err(error) => {
                        tracing::warn!("Could not get account {account_id}: {error}");
                    }
                }
            }),
        );

        let page = Arc::downgrade(self);
        let in_flight = InFlight::start(&self.in_flight);
        let account_id = options.account_id.clone();
        self.services.transactions.list(
            &options,
            Box::new(move |result| {
                let _in_flight = in_flight;
                let Some(page) = current_page(&page, generation) else {
                    return;
                };

                match result {
                    Ok(transactions) => {
                        page.root
                            .set_content(transactions_view(&transactions, &page.config));
                    }
                    Err(error) => {
                        tracing::warn!(
                            "Could not get transactions for account {account_id}: {error}"
                        );
                    }
                }
            }),
        );
    }

    fn clear(&self) {
        self.next_generation();
        self.root.set_content(transactions_view(&[], &self.config));
        self.root.set_title_text(TITLE_PLACEHOLDER);
        *self.last_options() = None;
    }

    fn remove_account(self: &Arc<Self>) {
        let Some(account_id) = self
            .last_options()
            .as_ref()
            .map(|options| options.account_id.clone())
        else {
            tracing::debug!("No account selected, nothing to delete");
            return;
        };

        if !self.services.confirm.confirm(REMOVE_ACCOUNT_PROMPT) {
            tracing::debug!("Deleting account {account_id} was cancelled");
            return;
        }

        tracing::info!("Deleting account {account_id}");
        let page = Arc::downgrade(self);
        let app = self.services.app.clone();
        let in_flight = InFlight::start(&self.in_flight);
        let removed_id = account_id.clone();
        self.services.accounts.remove(
            &account_id,
            Box::new(move |result| {
                let _in_flight = in_flight;

                match result {
                    Ok(()) => {
                        tracing::info!("Deleted account {removed_id}");
                        // The user may have moved on to another account in the meantime.
                        if let Some(page) = page.upgrade()
                            && page.shows_account(&removed_id)
                        {
                            page.clear();
                        }
                    }
                    Err(error) => {
                        tracing::error!("Could not delete account {removed_id}: {error}");
                    }
                }

                app.update_widgets();
            }),
        );
    }

    fn remove_transaction(&self, id: &str) {
        if !self.services.confirm.confirm(REMOVE_TRANSACTION_PROMPT) {
            tracing::debug!("Deleting transaction {id} was cancelled");
            return;
        }

        tracing::info!("Deleting transaction {id}");
        let app = self.services.app.clone();
        let in_flight = InFlight::start(&self.in_flight);
        let transaction_id = id.to_owned();
        self.services.transactions.remove(
            id,
            Box::new(move |result| {
                let _in_flight = in_flight;

                match result {
                    Ok(()) => {
                        tracing::info!("Deleted transaction {transaction_id}");
                        app.update();
                    }
                    Err(error) => {
                        tracing::error!("Could not delete transaction {transaction_id}: {error}");
                    }
                }
            }),
        );
    }

    fn handle_click(self: &Arc<Self>, event: &mut ClickEvent) {
        if event.closest(REMOVE_ACCOUNT_CLASS).is_some() {
            event.prevent_default();
            self.remove_account();
        }

        let transaction_id = event
            .closest(REMOVE_TRANSACTION_CLASS)
            .map(|target| target.data(TRANSACTION_ID_DATA).map(str::to_owned));
        if let Some(transaction_id) = transaction_id {
            event.prevent_default();

            match transaction_id {
                Some(id) => self.remove_transaction(&id),
                None => tracing::warn!("Delete control clicked without a transaction ID"),
            }
        }
    }
}

/// The page behind `page` if it still exists and is still on `generation`.
fn current_page(page: &Weak<Inner>, generation: u64) -> Option<Arc<Inner>> {
    let page = page.upgrade()?;

    if page.is_current(generation) {
        Some(page)
    } else {
        tracing::debug!("Discarding stale response for generation {generation}");
        None
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use scraper::Selector;
    use time::macros::datetime;

    use crate::{
        AccountInfo, ClientConfig, Error, PageRoot,
        page::{ClickEvent, EventTarget},
        test_utils::{
            FakeAccounts, FakeConfirm, FakeTransactions, RecordingApp, parse_html_fragment,
        },
        transaction::{RenderOptions, TransactionItem, TransactionKind},
    };

    use super::{PageServices, TITLE_PLACEHOLDER, TransactionsPage};

    struct TestPage {
        page: TransactionsPage,
        accounts: Arc<FakeAccounts>,
        transactions: Arc<FakeTransactions>,
        app: Arc<RecordingApp>,
        confirm: Arc<FakeConfirm>,
    }

    fn test_page() -> TestPage {
        let accounts = Arc::new(FakeAccounts::default());
        let transactions = Arc::new(FakeTransactions::default());
        let app = Arc::new(RecordingApp::default());
        let confirm = Arc::new(FakeConfirm::answering(true));
        let services = PageServices {
            accounts: accounts.clone(),
            transactions: transactions.clone(),
            app: app.clone(),
            confirm: confirm.clone(),
        };

        let page = TransactionsPage::new(
            Some(Arc::new(PageRoot::new())),
            services,
            ClientConfig::new("http://localhost"),
        )
        .unwrap();

        TestPage {
            page,
            accounts,
            transactions,
            app,
            confirm,
        }
    }

    fn account(id: &str, name: &str) -> AccountInfo {
        AccountInfo {
            id: id.to_owned(),
            name: name.to_owned(),
            sum: None,
        }
    }

    fn item(id: &str, kind: TransactionKind, name: &str, sum: f64) -> TransactionItem {
        TransactionItem {
            id: id.to_owned(),
            kind,
            name: name.to_owned(),
            sum,
            created_at: datetime!(2019-03-10 03:20:41),
        }
    }

    fn sample_transactions() -> Vec<TransactionItem> {
        vec![
            item("3", TransactionKind::Income, "Salary", 5000.0),
            item("1", TransactionKind::Expense, "Rent", 1200.0),
        ]
    }

    fn rendered_ids(root: &PageRoot) -> Vec<String> {
        let html = parse_html_fragment(&root.content_html());
        let selector = Selector::parse(".transaction .transaction__remove").unwrap();

        html.select(&selector)
            .filter_map(|button| button.value().attr("data-id"))
            .map(str::to_owned)
            .collect()
    }

    /// Render account 42 and answer both requests.
    fn render_savings(test: &TestPage) {
        test.page.render(Some(RenderOptions::new("42")));
        test.accounts.resolve_get(Ok(account("42", "Savings")));
        test.transactions.resolve_list(Ok(sample_transactions()));
    }

    fn delete_button_click(id: &str) -> ClickEvent {
        ClickEvent::new(vec![
            EventTarget::new("i").with_class("fa").with_class("fa-trash"),
            EventTarget::new("button")
                .with_class("btn")
                .with_class("transaction__remove")
                .with_data("id", id),
            EventTarget::new("div").with_class("transaction__controls"),
            EventTarget::new("div").with_class("transaction"),
            EventTarget::new("section").with_class("content"),
        ])
    }

    #[test]
    fn new_without_root_fails() {
        let test = test_page();
        let services = PageServices {
            accounts: test.accounts.clone(),
            transactions: test.transactions.clone(),
            app: test.app.clone(),
            confirm: test.confirm.clone(),
        };

        let result = TransactionsPage::new(None, services, ClientConfig::new("http://localhost"));

        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn registers_one_click_listener() {
        let test = test_page();

        render_savings(&test);
        test.page.update();
        test.page.clear();

        assert_eq!(test.page.root().click_listener_count(), 1);
    }

    #[test]
    fn render_without_options_does_nothing() {
        let test = test_page();

        test.page.render(None);
        test.page.render(Some(RenderOptions::new("")));

        assert!(test.accounts.get_calls().is_empty());
        assert!(test.transactions.list_calls().is_empty());
        assert_eq!(test.page.last_options(), None);
    }

    #[test]
    fn render_without_options_keeps_last_options() {
        let test = test_page();
        render_savings(&test);

        test.page.render(None);

        assert_eq!(test.page.last_options(), Some(RenderOptions::new("42")));
        assert_eq!(test.accounts.get_calls().len(), 1);
    }

    #[test]
    fn render_fetches_account_and_transactions() {
        let test = test_page();

        test.page.render(Some(RenderOptions::new("42")));

        assert_eq!(test.accounts.get_calls(), ["42"]);
        assert_eq!(test.transactions.list_calls(), [RenderOptions::new("42")]);
        assert_eq!(test.page.last_options(), Some(RenderOptions::new("42")));
    }

    #[test]
    fn render_writes_title_and_transactions_in_order() {
        let test = test_page();

        render_savings(&test);

        let root = test.page.root();
        assert_eq!(root.title_text(), "Savings");
        assert_eq!(rendered_ids(root), ["3", "1"]);
    }

    #[test]
    fn responses_may_arrive_in_any_order() {
        let test = test_page();

        test.page.render(Some(RenderOptions::new("42")));
        test.transactions.resolve_list(Ok(sample_transactions()));
        test.accounts.resolve_get(Ok(account("42", "Savings")));

        let root = test.page.root();
        assert_eq!(root.title_text(), "Savings");
        assert_eq!(rendered_ids(root), ["3", "1"]);
    }

    #[test]
    fn failed_account_lookup_leaves_title_unchanged() {
        let test = test_page();

        test.page.render(Some(RenderOptions::new("42")));
        test.accounts.resolve_get(Err(Error::Status(500)));
        test.transactions.resolve_list(Ok(sample_transactions()));

        let root = test.page.root();
        assert_eq!(root.title_text(), "");
        assert_eq!(rendered_ids(root), ["3", "1"]);
    }

    #[test]
    fn failed_transaction_list_leaves_content_unchanged() {
        let test = test_page();
        render_savings(&test);

        test.page.update();
        test.accounts.resolve_get(Ok(account("42", "Savings")));
        test.transactions
            .resolve_list(Err(Error::Api("Unauthorized".to_owned())));

        assert_eq!(rendered_ids(test.page.root()), ["3", "1"]);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let test = test_page();

        test.page.render(Some(RenderOptions::new("42")));
        test.page.render(Some(RenderOptions::new("7")));
        // The responses for account 42 arrive after account 7 was requested.
        test.accounts.resolve_get(Ok(account("42", "Savings")));
        test.transactions.resolve_list(Ok(sample_transactions()));

        let root = test.page.root();
        assert_eq!(root.title_text(), "");
        assert_eq!(root.content_html(), "");

        test.accounts.resolve_get(Ok(account("7", "Cheque")));
        test.transactions
            .resolve_list(Ok(vec![item("9", TransactionKind::Expense, "Coffee", 4.5)]));

        assert_eq!(root.title_text(), "Cheque");
        assert_eq!(rendered_ids(root), ["9"]);
    }

    #[test]
    fn update_renders_last_options_again() {
        let test = test_page();
        render_savings(&test);

        test.page.update();

        assert_eq!(test.accounts.get_calls(), ["42", "42"]);
        assert_eq!(
            test.transactions.list_calls(),
            [RenderOptions::new("42"), RenderOptions::new("42")]
        );
    }

    #[test]
    fn update_before_render_does_nothing() {
        let test = test_page();

        test.page.update();

        assert!(test.accounts.get_calls().is_empty());
        assert!(test.transactions.list_calls().is_empty());
    }

    #[test]
    fn rendering_same_transactions_twice_is_identical() {
        let test = test_page();
        render_savings(&test);
        let first = test.page.root().content_html();

        test.page.update();
        test.accounts.resolve_get(Ok(account("42", "Savings")));
        test.transactions.resolve_list(Ok(sample_transactions()));

        assert_eq!(test.page.root().content_html(), first);
    }

    #[test]
    fn clear_resets_page() {
        let test = test_page();
        render_savings(&test);

        test.page.clear();

        let root = test.page.root();
        assert_eq!(root.content_html(), "");
        assert_eq!(root.title_text(), TITLE_PLACEHOLDER);
        assert_eq!(test.page.last_options(), None);
    }

    #[test]
    fn clear_on_fresh_page() {
        let test = test_page();

        test.page.clear();

        assert_eq!(test.page.root().content_html(), "");
        assert_eq!(test.page.root().title_text(), TITLE_PLACEHOLDER);
    }

    #[test]
    fn clear_discards_in_flight_responses() {
        let test = test_page();
        test.page.render(Some(RenderOptions::new("42")));

        test.page.clear();
        test.accounts.resolve_get(Ok(account("42", "Savings")));
        test.transactions.resolve_list(Ok(sample_transactions()));

        assert_eq!(test.page.root().title_text(), TITLE_PLACEHOLDER);
        assert_eq!(test.page.root().content_html(), "");
    }

    #[test]
    fn remove_transaction_declined_sends_nothing() {
        let test = test_page();
        test.confirm.set_answer(false);

        test.page.remove_transaction("17");

        assert_eq!(test.confirm.prompts().len(), 1);
        assert!(test.transactions.remove_calls().is_empty());
    }

    #[test]
    fn remove_transaction_confirmed_updates_app() {
        let test = test_page();

        test.page.remove_transaction("17");
        assert_eq!(test.transactions.remove_calls(), ["17"]);
        assert_eq!(test.app.updates(), 0);

        test.transactions.resolve_remove(Ok(()));

        assert_eq!(test.app.updates(), 1);
    }

    #[test]
    fn failed_transaction_removal_does_not_update_app() {
        let test = test_page();

        test.page.remove_transaction("17");
        test.transactions.resolve_remove(Err(Error::Status(404)));

        assert_eq!(test.app.updates(), 0);
    }

    #[test]
    fn remove_account_without_account_does_nothing() {
        let test = test_page();

        test.page.remove_account();

        assert!(test.confirm.prompts().is_empty());
        assert!(test.accounts.remove_calls().is_empty());
    }

    #[test]
    fn remove_account_declined_sends_nothing() {
        let test = test_page();
        render_savings(&test);
        test.confirm.set_answer(false);

        test.page.remove_account();

        assert_eq!(test.confirm.prompts().len(), 1);
        assert!(test.accounts.remove_calls().is_empty());
        assert_eq!(test.page.root().title_text(), "Savings");
    }

    #[test]
    fn remove_account_clears_page_after_success() {
        let test = test_page();
        render_savings(&test);

        test.page.remove_account();

        assert_eq!(test.accounts.remove_calls(), ["42"]);
        // Nothing changes until the server confirms.
        assert_eq!(test.page.root().title_text(), "Savings");
        assert_eq!(test.page.last_options(), Some(RenderOptions::new("42")));

        test.accounts.resolve_remove(Ok(()));

        assert_eq!(test.page.root().title_text(), TITLE_PLACEHOLDER);
        assert_eq!(test.page.root().content_html(), "");
        assert_eq!(test.page.last_options(), None);
        assert_eq!(test.app.widget_updates(), 1);
    }

    #[test]
    fn failed_account_removal_keeps_page_and_updates_widgets() {
        let test = test_page();
        render_savings(&test);

        test.page.remove_account();
        test.accounts.resolve_remove(Err(Error::Status(500)));

        assert_eq!(test.page.root().title_text(), "Savings");
        assert_eq!(rendered_ids(test.page.root()), ["3", "1"]);
        assert_eq!(test.page.last_options(), Some(RenderOptions::new("42")));
        assert_eq!(test.app.widget_updates(), 1);
    }

    #[test]
    fn account_removal_does_not_clear_newer_account() {
        let test = test_page();
        render_savings(&test);

        test.page.remove_account();
        test.page.render(Some(RenderOptions::new("7")));
        test.accounts.resolve_remove(Ok(()));

        assert_eq!(test.page.last_options(), Some(RenderOptions::new("7")));
        assert_eq!(test.app.widget_updates(), 1);
    }

    #[test]
    fn clicking_delete_button_removes_transaction() {
        let test = test_page();
        render_savings(&test);
        let id = rendered_ids(test.page.root()).remove(1);

        let event = test.page.root().click(delete_button_click(&id));

        assert!(event.default_prevented());
        assert_eq!(test.transactions.remove_calls(), ["1"]);
    }

    #[test]
    fn clicking_remove_account_removes_account() {
        let test = test_page();
        render_savings(&test);
        let click = ClickEvent::new(vec![
            EventTarget::new("i").with_class("fa-trash"),
            EventTarget::new("button").with_class("remove-account"),
            EventTarget::new("section").with_class("content-header"),
        ]);

        let event = test.page.root().click(click);

        assert!(event.default_prevented());
        assert_eq!(test.accounts.remove_calls(), ["42"]);
        assert!(test.transactions.remove_calls().is_empty());
    }

    #[test]
    fn clicking_elsewhere_is_ignored() {
        let test = test_page();
        render_savings(&test);
        let click = ClickEvent::new(vec![
            EventTarget::new("h4").with_class("transaction__title"),
            EventTarget::new("div").with_class("transaction"),
        ]);

        let event = test.page.root().click(click);

        assert!(!event.default_prevented());
        assert!(test.confirm.prompts().is_empty());
    }

    #[test]
    fn clicking_delete_button_without_id_sends_nothing() {
        let test = test_page();
        let click =
            ClickEvent::new(vec![EventTarget::new("button").with_class("transaction__remove")]);

        let event = test.page.root().click(click);

        assert!(event.default_prevented());
        assert!(test.transactions.remove_calls().is_empty());
    }

    #[test]
    fn destroyed_page_ignores_late_responses() {
        let test = test_page();
        test.page.render(Some(RenderOptions::new("42")));

        test.page.destroy();
        test.accounts.resolve_get(Ok(account("42", "Savings")));
        test.transactions.resolve_list(Ok(sample_transactions()));

        assert_eq!(test.page.root().title_text(), "");
        assert_eq!(test.page.root().content_html(), "");
    }

    #[test]
    fn destroyed_page_does_not_fetch() {
        let test = test_page();

        test.page.destroy();
        test.page.render(Some(RenderOptions::new("42")));

        assert!(test.page.root().is_detached());
        assert!(test.accounts.get_calls().is_empty());
        assert!(test.transactions.list_calls().is_empty());
    }

    #[test]
    fn dropped_page_stops_handling_clicks() {
        let test = test_page();
        let root = test.page.root().clone();
        drop(test.page);

        let event = root.click(delete_button_click("1"));

        assert!(!event.default_prevented());
        assert!(test.confirm.prompts().is_empty());
    }

    #[tokio::test]
    async fn settled_waits_for_responses() {
        let test = test_page();
        test.page.render(Some(RenderOptions::new("42")));

        let pending = tokio::time::timeout(Duration::from_millis(20), test.page.settled()).await;
        assert!(pending.is_err(), "settled resolved with requests in flight");

        test.accounts.resolve_get(Ok(account("42", "Savings")));
        test.transactions.resolve_list(Ok(sample_transactions()));

        tokio::time::timeout(Duration::from_secs(1), test.page.settled())
            .await
            .expect("settled did not resolve after all responses arrived");
    }
}
