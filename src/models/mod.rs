pub mod filters;
pub mod movie;
pub mod search;
pub mod selection;
pub mod session;
pub mod social;

pub use filters::{ActiveFilter, DurationRange, FilterKind, FilterValue, MovieFilters};
pub use movie::{Movie, MovieId};
pub use search::SearchResult;
pub use selection::{FilterKey, FilterSelection, FilterSelectionPatch};
pub use session::{Credentials, RegisterRequest, RegisteredUser, Session, TokenResponse, UserId};
pub use social::{Friend, GroupRecommendation, RecommendedMovie};
