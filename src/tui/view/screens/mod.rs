mod url_input;
mod video_list;

pub use url_input::render_url_input;
pub use video_list::{render_video_list, VideoListData};
