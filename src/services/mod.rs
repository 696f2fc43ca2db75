pub mod auth;
pub mod catalog;
pub mod catalog_page;
pub mod error;
pub mod movie_search;
pub mod stores;
pub mod visits;

pub use auth::{decode_user_id, AuthStore};
pub use catalog::{InMemoryCatalog, MovieCatalog};
pub use catalog_page::{CatalogPage, CatalogQuery};
pub use error::SearchError;
pub use movie_search::{MovieSearch, SearchState};
pub use stores::{FilterStore, FriendsStore, ModalStore, SearchStore};
pub use visits::{MovieVisitTracker, VisitOutcome};
