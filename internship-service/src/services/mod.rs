pub mod metrics;
pub mod providers;
pub mod supabase;

pub use metrics::{get_metrics, init_metrics};
pub use supabase::SupabaseClient;
