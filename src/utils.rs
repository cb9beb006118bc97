//! # Utility Functions Module
//!
//! Small helpers shared by the command builders.

/// Converts an iterable of string-like items to `Vec<String>`.
///
/// # Example
/// ```rust
/// use flac2mp3::utils::to_string_vec;
///
/// let args = to_string_vec(["-codec:a", "libmp3lame", "-b:a", "192k"]);
/// assert_eq!(args.len(), 4);
/// ```
pub fn to_string_vec<T, I>(items: I) -> Vec<String>
where
    T: ToString,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Builds an argument vector for `std::process::Command::args`.
///
/// ```rust
/// let bitrate = "192k";
/// let args = flac2mp3::args!["-b:a", bitrate, "-y"];
/// assert_eq!(args, vec!["-b:a", "192k", "-y"]);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        $crate::utils::to_string_vec([$($item),*])
    };
}
