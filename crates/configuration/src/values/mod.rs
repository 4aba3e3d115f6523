mod order_by;
mod paging;

pub use order_by::{OrderByPolicy, OrderBySettings};
pub use paging::PagingSettings;
