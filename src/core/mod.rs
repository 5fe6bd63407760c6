pub mod source;
pub mod upserter;

pub use crate::domain::model::{GroupRequest, TenantRecord};
pub use crate::domain::ports::GroupsApi;
pub use crate::utils::error::Result;
