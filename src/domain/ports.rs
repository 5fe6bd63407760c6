use crate::domain::model::GroupRequest;
use crate::utils::error::UpsertError;
use async_trait::async_trait;

/// Remote side of the upsert: creates or replaces one group.
#[async_trait]
pub trait GroupsApi: Send + Sync {
    async fn put_group(&self, group: &GroupRequest) -> Result<(), UpsertError>;

    /// Where the groups are sent, for logging.
    fn endpoint(&self) -> &str;
}
