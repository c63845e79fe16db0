pub mod assets;
pub mod error;
pub mod html;
pub mod output;

pub use assets::{IMAGE_EXTENSIONS, combine_stylesheets, copy_images};
pub use error::OutputError;
pub use html::root_prefix;
pub use output::{read_override, write_file, write_tree};
