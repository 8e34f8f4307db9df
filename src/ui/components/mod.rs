pub mod command_overlay;
pub mod filter_bar;
pub mod input;
pub mod key_result;
pub mod search_input;

pub use command_overlay::draw_command_overlay;
pub use filter_bar::{cycle_genre, cycle_media_type, draw_filter_bar};
pub use key_result::KeyResult;
pub use search_input::{SearchEvent, SearchInput};
