use leptos::{prelude::*, task::spawn_local};
use posttree_api::ApiWeb;
use posttree_api::client::{ApiAuth, ApiPublic, AuthenticatedClient, PublicClient};
use tracing::trace;
use web_sys::{MouseEvent, SubmitEvent};

use crate::app::GlobalState;
use crate::panel::{PostPanel, ViewState, ViewStore};

impl ViewStore for RwSignal<ViewState> {
    fn peek<R>(&self, f: impl FnOnce(&ViewState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn apply<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

pub type WebPostPanel = PostPanel<ApiPublic<ApiWeb>, ApiAuth<ApiWeb>, RwSignal<ViewState>>;

#[derive(Clone, Copy)]
pub struct PostPanelHook {
    pub state: RwSignal<ViewState>,
    pub on_like: StoredValue<Box<dyn Fn(MouseEvent) + Sync + Send + 'static>>,
    pub on_toggle_comments: StoredValue<Box<dyn Fn(MouseEvent) + Sync + Send + 'static>>,
    pub on_input: StoredValue<Box<dyn Fn(String) + Sync + Send + 'static>>,
    pub on_submit: StoredValue<Box<dyn Fn(SubmitEvent) + Sync + Send + 'static>>,
    pub on_delete: StoredValue<Box<dyn Fn(String) + Sync + Send + 'static>>,
}

impl PostPanelHook {
    pub fn get_like(&self) -> impl Fn(MouseEvent) + Send + Sync + Clone + Copy + 'static + use<> {
        let f = self.on_like;
        move |e: MouseEvent| (f.read_value())(e)
    }
    pub fn get_toggle_comments(&self) -> impl Fn(MouseEvent) + Send + Sync + Clone + Copy + 'static + use<> {
        let f = self.on_toggle_comments;
        move |e: MouseEvent| (f.read_value())(e)
    }
    pub fn get_input(&self) -> impl Fn(String) + Send + Sync + Clone + Copy + 'static + use<> {
        let f = self.on_input;
        move |text: String| (f.read_value())(text)
    }
    pub fn get_submit(&self) -> impl Fn(SubmitEvent) + Send + Sync + Clone + Copy + 'static + use<> {
        let f = self.on_submit;
        move |e: SubmitEvent| (f.read_value())(e)
    }
    pub fn get_delete(&self) -> impl Fn(String) + Send + Sync + Clone + Copy + 'static + use<> {
        let f = self.on_delete;
        move |comment_id: String| (f.read_value())(comment_id)
    }
}

/// Resets `panel` for `post_id` right away and returns the fetch left to run.
///
/// `None` when there is no id or the panel already shows that post. The fetch
/// stores the user's likes in `global_state` when there are any.
pub fn plan_post_load<P, A, S>(
    panel: PostPanel<P, A, S>,
    post_id: Option<String>,
    global_state: GlobalState,
) -> Option<impl Future<Output = ()>>
where
    P: PublicClient,
    A: AuthenticatedClient,
    S: ViewStore,
{
    let post_id = post_id?;
    if !panel.reset(&post_id) {
        return None;
    }

    Some(async move {
        let Some(mine) = panel.fetch(&post_id).await else {
            return;
        };
        if !mine.is_empty() {
            global_state.set_likes(mine);
        }
    })
}

pub fn use_post_panel(post_id: Memo<Option<String>>) -> PostPanelHook {
    let global_state = expect_context::<GlobalState>();
    let state = RwSignal::new(ViewState::default());
    let panel = move || -> WebPostPanel {
        PostPanel::new(
            ApiPublic::new(ApiWeb::new()),
            ApiAuth::new(ApiWeb::new(), global_state.get_session_untracked()),
            state,
        )
    };

    Effect::new(move || {
        if let Some(task) = plan_post_load(panel(), post_id.get(), global_state) {
            spawn_local(task);
        }
    });

    let on_like = move |_: MouseEvent| {
        let panel = panel();
        spawn_local(async move {
            panel.toggle_like().await;
        });
    };

    let on_toggle_comments = move |_: MouseEvent| {
        panel().toggle_comments();
    };

    let on_input = move |text: String| {
        panel().set_pending_comment(text);
    };

    let on_submit = move |e: SubmitEvent| {
        e.prevent_default();
        let text = state.with_untracked(|state| state.pending_comment.clone());
        trace!("submitting comment of {} chars", text.len());
        let panel = panel();
        spawn_local(async move {
            panel.submit_comment(text).await;
        });
    };

    let on_delete = move |comment_id: String| {
        let panel = panel();
        spawn_local(async move {
            panel.delete_comment(&comment_id).await;
        });
    };

    PostPanelHook {
        state,
        on_like: StoredValue::new(Box::new(on_like)),
        on_toggle_comments: StoredValue::new(Box::new(on_toggle_comments)),
        on_input: StoredValue::new(Box::new(on_input)),
        on_submit: StoredValue::new(Box::new(on_submit)),
        on_delete: StoredValue::new(Box::new(on_delete)),
    }
}

#[cfg(test)]
mod use_post_panel_tests {
    use leptos::prelude::*;
    use posttree_api::session::Session;
    use posttree_shared::model::Like;
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::plan_post_load;
    use crate::app::GlobalState;
    use crate::panel::tests::{Call, MockRemote, panel, post};
    use crate::panel::{PanelStage, ViewStore};

    fn signed_in(owner: &Owner) -> GlobalState {
        owner.with(|| GlobalState::new(Some(Session::new("u1", "kim@tree.dev", "token1"))))
    }

    #[test(tokio::test)]
    async fn missing_post_id_skips_load() {
        let owner = Owner::new();
        let global_state = signed_in(&owner);
        let remote = MockRemote::new();
        let panel = panel(&remote);
        let state = panel.state().clone();

        assert!(plan_post_load(panel, None, global_state).is_none());
        assert_eq!(remote.calls(), Vec::<Call>::new());
        assert_eq!(
            state.peek(|state| state.stage),
            Some(PanelStage::Unloaded)
        );
    }

    #[test(tokio::test)]
    async fn same_post_id_is_not_loaded_twice() {
        let owner = Owner::new();
        let global_state = signed_in(&owner);
        let remote = MockRemote::new().with_post(post("p1", vec![], vec![]));
        let panel = panel(&remote);
        let state = panel.state().clone();
        let again = crate::panel::PostPanel::new(remote.clone(), remote.clone(), state);

        let task = plan_post_load(panel, Some("p1".to_string()), global_state);
        assert!(task.is_some());
        assert!(plan_post_load(again, Some("p1".to_string()), global_state).is_none());
    }

    #[test(tokio::test)]
    async fn user_likes_are_stored_only_when_present() {
        let owner = Owner::new();
        let global_state = signed_in(&owner);
        let remote = MockRemote::new()
            .with_post(post("p1", vec![], vec![Like::new("l1", "u1"), Like::new("l2", "u2")]))
            .with_post(post("p2", vec![], vec![Like::new("l3", "u2")]));
        let panel = panel(&remote);
        let state = panel.state().clone();

        let task = plan_post_load(panel, Some("p1".to_string()), global_state).unwrap();
        task.await;
        assert_eq!(global_state.get_likes_untracked(), vec![Like::new("l1", "u1")]);

        let panel = crate::panel::PostPanel::new(remote.clone(), remote.clone(), state.clone());
        let task = plan_post_load(panel, Some("p2".to_string()), global_state).unwrap();
        task.await;
        assert_eq!(global_state.get_likes_untracked(), vec![Like::new("l1", "u1")]);
        assert_eq!(
            state.peek(|state| state.likes.clone()),
            Some(vec![Like::new("l3", "u2")])
        );
    }
}
