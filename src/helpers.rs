/// `icon48.png`, `icon48.svg`, ...
pub fn icon_file_name(size: u32, extension: &str) -> String {
    format!("icon{}.{}", size, extension)
}
