mod path_validator;
mod video_id;
mod video_scanner;

pub use path_validator::{ensure_directory_exists, validate_file_exists};
pub use video_id::generate_video_id;
pub use video_scanner::{VideoFileInfo, scan_video_files};
