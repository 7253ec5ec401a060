pub mod use_post_panel;
