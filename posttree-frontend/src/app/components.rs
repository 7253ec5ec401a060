pub mod avatar {
    use leptos::prelude::*;

    use crate::path::PATH_IMG_FALLBACK;

    #[derive(
        Debug,
        Default,
        Clone,
        Copy,
        PartialEq,
        strum::EnumString,
        strum::Display,
        strum::EnumIter,
    )]
    #[strum(serialize_all = "lowercase")]
    pub enum AvatarShape {
        #[default]
        Circle,
        Round,
        Square,
    }

    impl AvatarShape {
        pub fn radius(&self) -> &'static str {
            match self {
                AvatarShape::Circle => "50%",
                AvatarShape::Round => "4px",
                AvatarShape::Square => "0px",
            }
        }
    }

    pub fn wrapper_style(shape: AvatarShape, size: u32) -> String {
        format!(
            "position: relative; display: inline-block; overflow: hidden; box-shadow: 0 3px 6px rgba(0, 0, 0, 0.2); border-radius: {}; width: {size}px; height: {size}px;",
            shape.radius()
        )
    }

    pub fn img_style(size: u32, mode: &str) -> String {
        format!("width: {size}px; height: {size}px; object-fit: {mode};")
    }

    #[component]
    pub fn Avatar(
        #[prop(optional)] shape: AvatarShape,
        #[prop(default = 50)] size: u32,
        #[prop(into, default = PATH_IMG_FALLBACK.to_string())] src: String,
        #[prop(into, default = "cover".to_string())] mode: String,
        #[prop(into, default = "ImgError..".to_string())] alt: String,
    ) -> impl IntoView {
        view! {
            <div style=wrapper_style(shape, size)>
                <img src=src alt=alt style=img_style(size, &mode) />
            </div>
        }
    }

}

pub mod post_panel {
    use leptos::prelude::*;
    use posttree_shared::time::display_time_now;
    use web_sys::MouseEvent;

    use crate::app::GlobalState;
    use crate::app::components::avatar::Avatar;
    use crate::app::hook::use_post_panel::use_post_panel;
    use crate::panel::is_comment_owner;

    #[component]
    pub fn PostPanel(post_id: Memo<Option<String>>) -> impl IntoView {
        let global_state = expect_context::<GlobalState>();
        let hook = use_post_panel(post_id);
        let state = hook.state;
        let on_input = hook.get_input();
        let on_delete = hook.get_delete();

        let fn_title = move || state.with(|s| s.title.clone());
        let fn_author = move || state.with(|s| s.author_line()).unwrap_or_default();
        let fn_like_count = move || state.with(|s| s.likes.len());
        let fn_like_class = move || {
            format!(
                "material-icons cursor-pointer hover:text-red-600 {}",
                if state.with(|s| s.is_liked) {
                    "text-red-600"
                } else {
                    "text-gray-400"
                }
            )
        };
        let fn_comment_count = move || state.with(|s| s.comment_count_label());
        let fn_pending = move || state.with(|s| s.pending_comment.clone());
        let fn_comments = move || {
            if !state.with(|s| s.comments_visible) {
                return None;
            }
            let session = global_state.get_session_tracked();
            let items = state.with(|s| {
                s.comments
                    .iter()
                    .map(|comment| {
                        let comment_id = comment.id.clone();
                        let own = is_comment_owner(comment, &session);
                        view! {
                            <li class="flex items-center p-2 border-b border-gray-300">
                                <div class="grow flex items-center gap-4 text-sm break-keep">
                                    <span class="font-bold">{comment.author.display_name.clone()}</span>
                                    <span>{comment.text.clone()}</span>
                                    <span class="text-[10px] min-w-[50px] text-gray-500">{display_time_now(comment.created_at)}</span>
                                </div>
                                {own.then(move || view! {
                                    <span
                                        on:click=move |_: MouseEvent| on_delete(comment_id.clone())
                                        class="material-icons text-[18px] cursor-pointer hover:text-red-600"
                                    >
                                        "highlight_off"
                                    </span>
                                })}
                            </li>
                        }
                    })
                    .collect_view()
            });

            Some(view! { <ul class="w-full bg-gray-50">{items}</ul> })
        };

        view! {
            <div class="w-[600px] mx-auto bg-white text-[48px]">
                <div class="relative w-full h-[200px] flex flex-col items-center justify-center bg-[#f3f3f5]">
                    <p class="text-[#2b2b2b] text-[0.6em] p-8 overflow-y-auto whitespace-break-spaces text-center break-keep">{fn_title}</p>
                    <p class="text-[#2b2b2b] text-[0.3em]">{fn_author}</p>
                    <span class="absolute bottom-0 right-0 p-[13px] text-[30px] flex items-center gap-1">
                        <span on:click=hook.get_like() class=fn_like_class>"favorite"</span>
                        <span class="text-[0.6em]">{fn_like_count}</span>
                    </span>
                </div>
                <div class="w-full bg-[#f3f3f5] border-y border-gray-300">
                    <div
                        on:click=hook.get_toggle_comments()
                        class="flex items-center w-full h-[30px] cursor-pointer hover:text-white hover:bg-[#14bd7e]"
                    >
                        <span class="m-2 font-bold text-[0.4em]">{fn_comment_count}</span>
                        <span class="material-icons text-[30px]">"arrow_drop_down"</span>
                    </div>
                    {fn_comments}
                </div>
                <form on:submit=hook.get_submit() class="flex items-center gap-2 p-2 bg-black/10">
                    <Avatar />
                    <input
                        id="myComment"
                        name="myComment"
                        placeholder="Write a comment!"
                        class="grow text-[0.3em] p-2"
                        prop:value=fn_pending
                        on:input=move |ev| on_input(event_target_value(&ev))
                    />
                    <button type="submit" class="text-[0.3em] px-4 py-2 hover:bg-[#14bd7e] hover:text-white">
                        "Post"
                    </button>
                </form>
            </div>
        }
    }
}
