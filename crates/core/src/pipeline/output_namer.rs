/// Placeholder replaced by the target file's stem in caller templates.
pub const STEM_PLACEHOLDER: &str = "{original}";

/// Output filename policy for one batch.
///
/// A caller template has the stem interpolated and is otherwise used
/// verbatim (the caller supplies its own extension). Without a template,
/// the default pattern is `swap_<index padded to 3 digits>_<stem>.png`.
pub struct OutputNamer {
    template: Option<String>,
}

impl OutputNamer {
    pub fn new(template: Option<&str>) -> Self {
        Self {
            template: template.map(str::to_owned),
        }
    }

    /// Filename for the item at `index` (1-based) with the given stem.
    pub fn name_for(&self, index: usize, stem: &str) -> String {
        match &self.template {
            Some(template) => template.replace(STEM_PLACEHOLDER, stem),
            None => format!("swap_{index:03}_{stem}.png"),
        }
    }
}
