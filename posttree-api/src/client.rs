use posttree_shared::model::{Comment, Like, Post};
use tracing::trace;

use crate::session::Session;
use crate::{Api, ApiErr};

/// Calls anyone may make.
pub trait PublicClient {
    async fn get_post(&self, post_id: &str) -> Result<Post, ApiErr>;
}

/// Calls made on behalf of the signed in user.
pub trait AuthenticatedClient {
    fn session(&self) -> &Session;

    async fn create_comment(&self, post_id: &str, comment: &str) -> Result<Comment, ApiErr>;

    async fn delete_comment(&self, comment_id: &str) -> Result<(), ApiErr>;

    async fn create_like(&self, post_id: &str) -> Result<Like, ApiErr>;

    /// `None` sends the delete without an `id`, the server decides what that means.
    async fn delete_like(&self, like_id: Option<&str>) -> Result<(), ApiErr>;
}

#[derive(Clone, Default)]
pub struct ApiPublic<A> {
    api: A,
}

impl<A: Api> ApiPublic<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: Api> PublicClient for ApiPublic<A> {
    async fn get_post(&self, post_id: &str) -> Result<Post, ApiErr> {
        trace!("get_post {post_id}");
        self.api.get_post(post_id).send_native::<Post>().await
    }
}

#[derive(Clone, Default)]
pub struct ApiAuth<A> {
    api: A,
    session: Session,
}

impl<A: Api> ApiAuth<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self { api, session }
    }
}

impl<A: Api> AuthenticatedClient for ApiAuth<A> {
    fn session(&self) -> &Session {
        &self.session
    }

    async fn create_comment(&self, post_id: &str, comment: &str) -> Result<Comment, ApiErr> {
        trace!("create_comment on {post_id}");
        self.api
            .add_post_comment(post_id, comment)
            .send_native_with_token::<Comment>(&self.session.token)
            .await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), ApiErr> {
        trace!("delete_comment {comment_id}");
        self.api
            .delete_post_comment(comment_id)
            .send_native_with_token_empty(&self.session.token)
            .await
    }

    async fn create_like(&self, post_id: &str) -> Result<Like, ApiErr> {
        trace!("create_like on {post_id}");
        self.api
            .add_post_like(post_id)
            .send_native_with_token::<Like>(&self.session.token)
            .await
    }

    async fn delete_like(&self, like_id: Option<&str>) -> Result<(), ApiErr> {
        trace!("delete_like {like_id:?}");
        self.api
            .delete_post_like(like_id.map(str::to_string))
            .send_native_with_token_empty(&self.session.token)
            .await
    }
}
