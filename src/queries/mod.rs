pub mod group_matcher;
pub mod intersection;
pub mod co_membership;

pub use co_membership::co_membership;
pub use group_matcher::{find_all_groups, find_group};
pub use intersection::{analyze, distinct_members};
