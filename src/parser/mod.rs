pub mod flags;
pub mod region;

pub use flags::{parse_bool, parse_number, parse_query_string, RawArgs};
pub use region::{classify_regions, count_regions, has_low_cost, match_region};
