//! Client side of the catalog: an HTTP API client and a store that keeps a
//! local view of the product list in sync with the server.

pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod state;
pub mod store;

pub use api::{HttpProductApi, ProductApi, ProductPage};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use state::{ClientState, Notification, NotificationLevel, ProductDraft, QueryParams};
pub use store::{FetchOutcome, FetchRequest, ProductStore};
