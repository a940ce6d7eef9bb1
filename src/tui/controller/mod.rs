pub mod common;
pub mod filter_input;
pub mod folder_prompt;
pub mod settings;
pub mod url_input;
pub mod video_list;

pub use common::handle_help_key;
pub use filter_input::handle_filter_input_key;
pub use folder_prompt::handle_folder_prompt_key;
pub use settings::handle_settings_key;
pub use url_input::handle_url_input_key;
pub use video_list::handle_video_list_key;
