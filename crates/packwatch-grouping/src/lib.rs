//! Classification and grouping of sealed-product offers.
//!
//! Every function in this crate is pure and total: empty or unrecognised
//! text yields the "unknown" / absent sentinel, never an error. Callers may
//! classify offers from many storefronts concurrently and merge the results
//! through a single [`OfferAccumulator`].

pub mod aggregate;
pub mod count_tag;
pub mod group_key;
pub mod normalize;
pub mod product_type;
pub mod queries;
mod rules;
pub mod screen;
pub mod select;
pub mod series;
pub mod single_card;
pub mod theme;

pub use aggregate::{IngestOutcome, OfferAccumulator, ProductGroup};
pub use count_tag::detect_count_tag;
pub use group_key::{build_group_key_and_name, classify, Classification};
pub use normalize::normalize_text;
pub use product_type::{detect_type, is_elite_trainer_box_family, SEALED_PRODUCT};
pub use queries::DEFAULT_QUERIES;
pub use screen::{matched_queries, reject_reason, screen_listing, RejectReason, Screening};
pub use select::{select_offers, SelectionMode};
pub use series::{
    detect_series, is_known_series, series_hint_from_matches, series_labels, series_rank, UNKNOWN_SERIES,
};
pub use single_card::looks_like_single_card;
pub use theme::detect_theme;
