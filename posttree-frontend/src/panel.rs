use std::sync::{Arc, Mutex, PoisonError};

use posttree_api::client::{AuthenticatedClient, PublicClient};
use posttree_api::session::Session;
use posttree_shared::model::{Author, Comment, Like, Post};
use posttree_shared::valid::post::process_comment;
use tracing::{error, trace, warn};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::EnumIs,
)]
#[strum(serialize_all = "lowercase")]
pub enum PanelStage {
    #[default]
    Unloaded,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeIntent {
    Create,
    Delete(String),
    /// `is_liked` says yes but no like of the current user is in the list.
    DeleteStale,
}

/// Everything one mounted panel shows. Reset wholesale when the post changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub post_id: Option<String>,
    pub stage: PanelStage,
    pub title: String,
    pub author: Option<Author>,
    pub pending_comment: String,
    pub comments: Vec<Comment>,
    pub likes: Vec<Like>,
    pub is_liked: bool,
    pub comments_visible: bool,
}

impl ViewState {
    /// Returns false when the state already belongs to `post_id`.
    pub fn begin_load(&mut self, post_id: &str) -> bool {
        if self.post_id.as_deref() == Some(post_id) {
            return false;
        }
        *self = ViewState {
            post_id: Some(post_id.to_string()),
            stage: PanelStage::Loading,
            ..Default::default()
        };

        true
    }

    /// Applies a fetched post, returns the likes that belong to `user_id`.
    pub fn finish_load(&mut self, post: Post, user_id: &str) -> Vec<Like> {
        let mine = post
            .likes
            .iter()
            .filter(|like| like.user == user_id)
            .cloned()
            .collect::<Vec<Like>>();
        self.is_liked = !mine.is_empty();
        self.likes = post.likes;
        self.comments = post.comments.into_iter().rev().collect();
        self.title = post.title;
        self.author = Some(post.author);
        self.stage = PanelStage::Loaded;

        mine
    }

    pub fn fail_load(&mut self) {
        self.stage = PanelStage::Loaded;
    }

    pub fn comment_created(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn comment_deleted(&mut self, comment_id: &str) {
        self.comments.retain(|comment| comment.id != comment_id);
    }

    pub fn like_intent(&self, user_id: &str) -> LikeIntent {
        let found = self.likes.iter().find(|like| like.user == user_id);
        match (self.is_liked, found) {
            (false, None) => LikeIntent::Create,
            (_, Some(like)) => LikeIntent::Delete(like.id.clone()),
            (true, None) => LikeIntent::DeleteStale,
        }
    }

    pub fn like_created(&mut self, like: Like) {
        self.is_liked = true;
        self.likes.insert(0, like);
    }

    pub fn like_deleted(&mut self, like_id: Option<&str>) {
        self.likes.retain(|like| Some(like.id.as_str()) != like_id);
        self.is_liked = false;
    }

    pub fn author_line(&self) -> Option<String> {
        self.author
            .as_ref()
            .map(|author| format!("{} / {}", author.display_name, author.email))
    }

    pub fn comment_count_label(&self) -> String {
        format!("{} comments", self.comments.len())
    }
}

pub fn is_comment_owner(comment: &Comment, session: &Session) -> bool {
    comment.author.email == session.email
}

/// Where a panel keeps its [`ViewState`]. Both calls return `None` once the store is gone.
pub trait ViewStore {
    fn peek<R>(&self, f: impl FnOnce(&ViewState) -> R) -> Option<R>;
    fn apply<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> Option<R>;
}

pub type SharedViewState = Arc<Mutex<ViewState>>;

impl ViewStore for SharedViewState {
    fn peek<R>(&self, f: impl FnOnce(&ViewState) -> R) -> Option<R> {
        let state = self.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&state))
    }

    fn apply<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> Option<R> {
        let mut state = self.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut state))
    }
}

/// Comment/like panel for one post.
///
/// Every operation reads the store, awaits the remote call and then writes the
/// store again, so calls may overlap and nothing is cancelled when the post changes.
pub struct PostPanel<P, A, S> {
    public: P,
    auth: A,
    state: S,
}

impl<P, A, S> PostPanel<P, A, S>
where
    P: PublicClient,
    A: AuthenticatedClient,
    S: ViewStore,
{
    pub fn new(public: P, auth: A, state: S) -> Self {
        Self {
            public,
            auth,
            state,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn session(&self) -> &Session {
        self.auth.session()
    }

    /// Resets the state for `post_id` right away; false when it already belongs to it.
    pub fn reset(&self, post_id: &str) -> bool {
        self.state
            .apply(|state| state.begin_load(post_id))
            .unwrap_or_default()
    }

    /// Fetches `post_id` and applies it. Returns the current user's likes on success.
    pub async fn fetch(&self, post_id: &str) -> Option<Vec<Like>> {
        let result = self.public.get_post(post_id).await;
        match result {
            Ok(post) => {
                let user_id = self.auth.session().id.clone();
                let mine = self
                    .state
                    .apply(move |state| state.finish_load(post, &user_id));
                trace!("post {post_id} loaded, liked by user: {mine:?}");
                mine
            }
            Err(err) => {
                error!("post panel failed to load post {post_id}: {err}");
                self.state.apply(|state| state.fail_load());
                None
            }
        }
    }

    /// Runs once per distinct post id.
    pub async fn load(&self, post_id: &str) -> Option<Vec<Like>> {
        if !self.reset(post_id) {
            trace!("post {post_id} already loaded");
            return None;
        }

        self.fetch(post_id).await
    }

    pub fn set_pending_comment(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.apply(move |state| state.pending_comment = text);
    }

    pub fn toggle_comments(&self) {
        self.state
            .apply(|state| state.comments_visible = !state.comments_visible);
    }

    pub async fn submit_comment(&self, text: impl Into<String>) {
        let Ok(text) = process_comment(text) else {
            return;
        };
        let Some(post_id) = self.state.peek(|state| state.post_id.clone()).flatten() else {
            error!("post panel: comment submitted before any post was loaded");
            return;
        };
        self.state.apply(|state| {
            state.pending_comment.clear();
            state.comments_visible = true;
        });

        match self.auth.create_comment(&post_id, &text).await {
            Ok(comment) => {
                self.state.apply(move |state| state.comment_created(comment));
            }
            Err(err) => {
                error!("post panel failed to create comment on {post_id}: {err}");
            }
        }
    }

    pub async fn delete_comment(&self, comment_id: &str) {
        match self.auth.delete_comment(comment_id).await {
            Ok(()) => {
                self.state.apply(|state| state.comment_deleted(comment_id));
            }
            Err(err) => {
                error!("post panel failed to delete comment {comment_id}: {err}");
            }
        }
    }

    pub async fn toggle_like(&self) {
        let user_id = self.auth.session().id.clone();
        let Some((intent, post_id)) = self
            .state
            .peek(|state| (state.like_intent(&user_id), state.post_id.clone()))
        else {
            return;
        };

        match intent {
            LikeIntent::Create => {
                let Some(post_id) = post_id else {
                    error!("post panel: like toggled before any post was loaded");
                    return;
                };
                match self.auth.create_like(&post_id).await {
                    Ok(like) => {
                        self.state.apply(move |state| state.like_created(like));
                    }
                    Err(err) => {
                        error!("post panel failed to like {post_id}: {err}");
                    }
                }
            }
            LikeIntent::Delete(like_id) => {
                self.remove_like(Some(&like_id)).await;
            }
            LikeIntent::DeleteStale => {
                warn!(
                    "post panel: marked as liked but user {user_id} has no like on {post_id:?}, deleting without a target"
                );
                self.remove_like(None).await;
            }
        }
    }

    async fn remove_like(&self, like_id: Option<&str>) {
        match self.auth.delete_like(like_id).await {
            Ok(()) => {
                self.state.apply(|state| state.like_deleted(like_id));
            }
            Err(err) => {
                error!("post panel failed to delete like {like_id:?}: {err}");
            }
        }
    }
}
