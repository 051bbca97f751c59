pub mod page;
pub mod state;

pub use page::{
    handle_local, handle_page, handle_search, handle_select, handle_upload,
    validate_backdrop_path, UPLOAD_FIELD,
};
pub use state::{handle_state, __path_handle_state};
