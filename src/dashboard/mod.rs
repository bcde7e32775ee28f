//! The dashboard: the add form, the totals and the list of open transactions.

mod aggregation;
mod handlers;
mod view;

pub use aggregation::{CategoryTotal, Totals, expenses_by_category};
pub use handlers::{get_totals_partial, get_transactions_partial};
pub(crate) use view::{dashboard_view, fetch_error_message};
