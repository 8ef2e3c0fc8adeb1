//! User registration keyed by chat identity.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{ChatId, User, UserProfile},
    ports::{RepositoryError, UserRepository},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// User registry service.
#[derive(Clone)]
pub struct UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the user for `chat_id`, registering them on first contact.
    ///
    /// A concurrent registration of the same chat identity resolves to the
    /// stored user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn register(
        &self,
        chat_id: ChatId,
        profile: UserProfile,
    ) -> TaskServiceResult<User> {
        if let Some(existing) = self.repository.find_user_by_chat_id(chat_id).await? {
            return Ok(existing);
        }

        let user = User::new(chat_id, profile, &*self.clock);
        match self.repository.store_user(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), chat_id = %chat_id, "registered user");
                Ok(user)
            }
            Err(RepositoryError::DuplicateChatId(_)) => self.find_by_chat_id(chat_id).await,
            Err(err) => Err(err.into()),
        }
    }

    /// Looks up a registered user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UserNotFound`] when nobody is registered
    /// under `chat_id`.
    pub async fn find_by_chat_id(&self, chat_id: ChatId) -> TaskServiceResult<User> {
        self.repository
            .find_user_by_chat_id(chat_id)
            .await?
            .ok_or(TaskServiceError::UserNotFound(chat_id))
    }

    /// Deletes a user together with everything they own.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UserNotFound`] or
    /// [`TaskServiceError::Repository`].
    pub async fn delete(&self, chat_id: ChatId) -> TaskServiceResult<()> {
        let user = self.find_by_chat_id(chat_id).await?;
        if self.repository.delete_user(user.id()).await? {
            info!(user_id = %user.id(), "deleted user");
            Ok(())
        } else {
            Err(TaskServiceError::UserNotFound(chat_id))
        }
    }
}
