//! Client-side catalog store.
//!
//! [`ProductStore`] owns the [`ClientState`] and is mutated only through its
//! methods. Network calls are split in two: a `begin_*` method records intent
//! and returns what to send, a `complete_*` method folds the response back in.
//! Every list fetch carries a token and only the response to the most recent
//! one is applied, so requests may overlap freely. `loading` stays set while
//! any list fetch, product fetch or mutation is outstanding. Typed search text
//! goes through a [`SearchInput`] and reaches the query only once it settles.
//! The async helpers at the bottom drive both halves against a [`ProductApi`].

use std::collections::HashSet;
use std::time::Instant;

use crate::analytics::{PriceSummary, summarize};
use crate::client::api::{ProductApi, ProductPage};
use crate::client::config::ClientConfig;
use crate::client::debounce::SearchInput;
use crate::client::error::ClientResult;
use crate::client::state::{ClientState, Notification, ProductDraft, QueryParams};
use crate::domain::product::{Product, ProductSort};
use crate::domain::types::ProductId;

pub const PRODUCT_CREATED_MESSAGE: &str = "Product added successfully";
pub const PRODUCT_UPDATED_MESSAGE: &str = "Product updated successfully";
pub const PRODUCT_DELETED_MESSAGE: &str = "Product deleted successfully";
pub const PRODUCT_ALREADY_DELETED_MESSAGE: &str = "Product was already deleted";
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found";

/// A list fetch to send. Pass the token back to [`ProductStore::complete_fetch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: u64,
    pub params: QueryParams,
}

/// A single-product fetch to send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductRequest {
    pub token: u64,
    pub id: ProductId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was issued; the response was discarded.
    Stale,
    /// The requested page ran past the end; fetch the last page instead.
    Clamped(FetchRequest),
}

#[derive(Debug)]
pub struct ProductStore {
    state: ClientState,
    page_size: usize,
    list_token: u64,
    product_token: u64,
    /// Ids of list entries patched locally and not yet confirmed by the server.
    unconfirmed: HashSet<ProductId>,
    notifications: Vec<Notification>,
    search: SearchInput,
    pending_list: bool,
    pending_product: bool,
    pending_mutations: usize,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl ProductStore {
    pub fn new(config: &ClientConfig) -> Self {
        let state = ClientState::default();
        let search = SearchInput::new(state.query.search_query.clone(), config.debounce());
        Self {
            state,
            page_size: config.page_size.max(1),
            list_token: 0,
            product_token: 0,
            unconfirmed: HashSet::new(),
            notifications: Vec::new(),
            search,
            pending_list: false,
            pending_product: false,
            pending_mutations: 0,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn snapshot(&self) -> ClientState {
        self.state.clone()
    }

    pub fn is_unconfirmed(&self, id: ProductId) -> bool {
        self.unconfirmed.contains(&id)
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn params(&self) -> QueryParams {
        QueryParams::new(&self.state.query, self.page_size)
    }

    fn sync_loading(&mut self) {
        self.state.loading =
            self.pending_list || self.pending_product || self.pending_mutations > 0;
    }

    fn start_mutation(&mut self) {
        self.pending_mutations += 1;
        self.sync_loading();
    }

    fn finish_mutation(&mut self) {
        self.pending_mutations = self.pending_mutations.saturating_sub(1);
        self.sync_loading();
    }

    // Search input

    /// Records typed search text. Nothing is fetched until [`Self::poll_search`]
    /// finds it settled.
    pub fn input_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// The text as typed, which may run ahead of the committed query.
    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Commits settled search text, returning the fetch for it.
    pub fn poll_search(&mut self, now: Instant) -> Option<FetchRequest> {
        let text = self.search.poll(now)?;
        self.set_search_query(text)
    }

    // Query state

    /// Commits a new search text. Returns the fetch to send when it changed.
    pub fn set_search_query(&mut self, search: impl Into<String>) -> Option<FetchRequest> {
        let search = search.into();
        if search == self.state.query.search_query {
            return None;
        }
        self.search.reset(search.clone());
        self.state.query.search_query = search;
        self.state.query.current_page = 1;
        Some(self.begin_fetch())
    }

    pub fn set_sort_option(&mut self, sort: ProductSort) -> Option<FetchRequest> {
        if sort == self.state.query.sort_option {
            return None;
        }
        self.state.query.sort_option = sort;
        self.state.query.current_page = 1;
        Some(self.begin_fetch())
    }

    pub fn set_page(&mut self, page: usize) -> Option<FetchRequest> {
        let page = page.max(1);
        if page == self.state.query.current_page {
            return None;
        }
        self.state.query.current_page = page;
        Some(self.begin_fetch())
    }

    /// Refetches the list for the unchanged query.
    pub fn refresh(&mut self) -> FetchRequest {
        self.begin_fetch()
    }

    // Form state

    pub fn set_form_data(&mut self, draft: ProductDraft) {
        self.state.form_data = draft;
    }

    pub fn reset_form(&mut self) {
        self.state.form_data = ProductDraft::default();
    }

    // List fetch

    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.list_token += 1;
        self.pending_list = true;
        self.sync_loading();
        FetchRequest {
            token: self.list_token,
            params: self.params(),
        }
    }

    pub fn complete_fetch(&mut self, token: u64, result: ClientResult<ProductPage>) -> FetchOutcome {
        if token != self.list_token {
            log::debug!("Discarding stale product list response {token}");
            return FetchOutcome::Stale;
        }

        self.pending_list = false;
        self.sync_loading();
        self.unconfirmed.clear();

        match result {
            Ok(page) => {
                if let Some(last_page) = page.pagination.clamped_page() {
                    self.state.query.current_page = last_page;
                    return FetchOutcome::Clamped(self.begin_fetch());
                }
                self.state.products = page.products;
                self.state.pagination = page.pagination;
                self.state.error = None;
            }
            Err(err) => {
                log::warn!("Failed to fetch products: {err}");
                self.state.products.clear();
                self.state.error = Some(err.user_message().to_string());
            }
        }

        FetchOutcome::Applied
    }

    // Single product

    pub fn begin_fetch_product(&mut self, id: ProductId) -> ProductRequest {
        self.product_token += 1;
        self.pending_product = true;
        self.sync_loading();
        ProductRequest {
            token: self.product_token,
            id,
        }
    }

    /// Applies a single-product response. Returns `false` for a stale token.
    pub fn complete_fetch_product(
        &mut self,
        token: u64,
        result: ClientResult<Option<Product>>,
    ) -> bool {
        if token != self.product_token {
            return false;
        }

        self.pending_product = false;
        self.sync_loading();

        match result {
            Ok(Some(product)) => {
                self.state.form_data = ProductDraft::from(&product);
                self.state.current_product = Some(product);
                self.state.error = None;
            }
            Ok(None) => {
                self.state.current_product = None;
                self.state.error = Some(PRODUCT_NOT_FOUND_MESSAGE.to_string());
            }
            Err(err) => {
                log::warn!("Failed to fetch product: {err}");
                self.state.current_product = None;
                self.state.error = Some(err.user_message().to_string());
            }
        }

        true
    }

    // Mutations

    /// The staged form to POST.
    pub fn begin_create(&mut self) -> ProductDraft {
        self.start_mutation();
        self.state.form_data.clone()
    }

    /// Creation is pessimistic: the list only changes through the returned refetch.
    pub fn complete_create(&mut self, result: ClientResult<Product>) -> Option<FetchRequest> {
        self.finish_mutation();
        match result {
            Ok(product) => {
                log::debug!("Created product {}", product.id);
                self.reset_form();
                self.notifications
                    .push(Notification::success(PRODUCT_CREATED_MESSAGE));
                Some(self.begin_fetch())
            }
            Err(err) => {
                log::warn!("Failed to create product: {err}");
                self.notifications
                    .push(Notification::error(err.user_message()));
                None
            }
        }
    }

    /// Patches the listed product with the staged form before the PUT is sent
    /// and returns the body to send. A form that is not a valid product is
    /// sent as is, without a local patch.
    pub fn begin_update(&mut self, id: ProductId) -> ProductDraft {
        self.start_mutation();
        let draft = self.state.form_data.clone();

        if let Some(product) = self.state.products.iter_mut().find(|p| p.id == id)
            && draft.apply_to(product).is_ok()
        {
            self.unconfirmed.insert(id);
        }

        draft
    }

    /// Confirms the patch with the server echo, or returns a refetch that
    /// discards every unconfirmed patch.
    pub fn complete_update(
        &mut self,
        id: ProductId,
        result: ClientResult<Product>,
    ) -> Option<FetchRequest> {
        self.finish_mutation();
        match result {
            Ok(product) => {
                if let Some(listed) = self.state.products.iter_mut().find(|p| p.id == id) {
                    *listed = product.clone();
                }
                self.unconfirmed.remove(&id);
                self.state.current_product = Some(product);
                self.notifications
                    .push(Notification::success(PRODUCT_UPDATED_MESSAGE));
                None
            }
            Err(err) => {
                log::warn!("Failed to update product {id}: {err}");
                self.notifications
                    .push(Notification::error(err.user_message()));
                Some(self.begin_fetch())
            }
        }
    }

    pub fn begin_delete(&mut self, id: ProductId) -> ProductId {
        self.start_mutation();
        id
    }

    /// A product that was already gone counts as deleted.
    pub fn complete_delete(
        &mut self,
        id: ProductId,
        result: ClientResult<Product>,
    ) -> Option<FetchRequest> {
        self.finish_mutation();
        match result {
            Ok(_) => {
                self.notifications
                    .push(Notification::success(PRODUCT_DELETED_MESSAGE));
                Some(self.begin_fetch())
            }
            Err(err) if err.is_not_found() => {
                log::info!("Product {id} was already deleted");
                self.notifications
                    .push(Notification::info(PRODUCT_ALREADY_DELETED_MESSAGE));
                Some(self.begin_fetch())
            }
            Err(err) => {
                log::warn!("Failed to delete product {id}: {err}");
                self.notifications
                    .push(Notification::error(err.user_message()));
                None
            }
        }
    }

    // Async drivers

    /// Sends `request` and applies the response, following page clamps.
    pub async fn dispatch<A>(&mut self, api: &A, mut request: FetchRequest) -> FetchOutcome
    where
        A: ProductApi,
    {
        loop {
            let result = api.list_products(&request.params).await;
            match self.complete_fetch(request.token, result) {
                FetchOutcome::Clamped(next) => request = next,
                outcome => return outcome,
            }
        }
    }

    pub async fn dispatch_opt<A>(&mut self, api: &A, request: Option<FetchRequest>)
    where
        A: ProductApi,
    {
        if let Some(request) = request {
            self.dispatch(api, request).await;
        }
    }

    pub async fn fetch_products<A: ProductApi>(&mut self, api: &A) -> FetchOutcome {
        let request = self.refresh();
        self.dispatch(api, request).await
    }

    pub async fn fetch_product<A: ProductApi>(&mut self, api: &A, id: ProductId) {
        let request = self.begin_fetch_product(id);
        let result = api.get_product(request.id).await;
        self.complete_fetch_product(request.token, result);
    }

    pub async fn create_product<A: ProductApi>(&mut self, api: &A) {
        let draft = self.begin_create();
        let result = api.create_product(&draft).await;
        let refetch = self.complete_create(result);
        self.dispatch_opt(api, refetch).await;
    }

    pub async fn update_product<A: ProductApi>(&mut self, api: &A, id: ProductId) {
        let draft = self.begin_update(id);
        let result = api.update_product(id, &draft).await;
        let refetch = self.complete_update(id, result);
        self.dispatch_opt(api, refetch).await;
    }

    pub async fn delete_product<A: ProductApi>(&mut self, api: &A, id: ProductId) {
        let id = self.begin_delete(id);
        let result = api.delete_product(id).await;
        let refetch = self.complete_delete(id, result);
        self.dispatch_opt(api, refetch).await;
    }

    /// Waits for pending search input to settle, then fetches the first page
    /// for it. Returns `None` when nothing was pending or the text is unchanged.
    pub async fn settle_search<A: ProductApi>(&mut self, api: &A) -> Option<FetchOutcome> {
        let due = self.search_deadline()?;
        tokio::time::sleep_until(tokio::time::Instant::from_std(due)).await;
        let request = self.poll_search(tokio::time::Instant::now().into_std())?;
        Some(self.dispatch(api, request).await)
    }
}

/// Loads the whole catalog and summarizes its prices.
pub async fn fetch_analytics<A: ProductApi>(api: &A) -> ClientResult<PriceSummary> {
    let products = api.list_all_products().await?;
    Ok(summarize(&products))
}
