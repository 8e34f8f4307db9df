mod home;
mod listing;
mod not_found;
mod search_results;

pub use home::HomeView;
pub use listing::ListingView;
pub use not_found::NotFoundView;
pub use search_results::SearchResultsView;
