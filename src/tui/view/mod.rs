pub mod components;
pub mod screens;

pub use screens::{render_url_input, render_video_list, VideoListData};
