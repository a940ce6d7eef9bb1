use crate::model::VideoDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtensionFilter {
    #[default]
    All,
    Only(String),
}

impl ExtensionFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim().trim_start_matches('.').to_ascii_lowercase();
        if value.is_empty() || value == "all" {
            ExtensionFilter::All
        } else {
            ExtensionFilter::Only(value)
        }
    }

    pub fn label(&self) -> String {
        match self {
            ExtensionFilter::All => "All".to_string(),
            ExtensionFilter::Only(ext) => format!(".{}", ext),
        }
    }

    pub fn matches(&self, extension: &str) -> bool {
        match self {
            ExtensionFilter::All => true,
            ExtensionFilter::Only(ext) => ext == extension,
        }
    }

    /// Next option in `All, ext1, ext2, ..., All` order.
    pub fn cycle(&self, extensions: &[String]) -> Self {
        match self {
            ExtensionFilter::All => extensions
                .first()
                .map(|e| ExtensionFilter::Only(e.clone()))
                .unwrap_or(ExtensionFilter::All),
            ExtensionFilter::Only(current) => {
                let pos = extensions.iter().position(|e| e == current);
                match pos.and_then(|i| extensions.get(i + 1)) {
                    Some(next) => ExtensionFilter::Only(next.clone()),
                    None => ExtensionFilter::All,
                }
            }
        }
    }
}

/// Name substring (case-insensitive) AND extension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub name_query: String,
    pub extension: ExtensionFilter,
}

impl FilterCriteria {
    pub fn new(name_query: impl Into<String>, extension: ExtensionFilter) -> Self {
        Self {
            name_query: name_query.into(),
            extension,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name_query.is_empty() && self.extension == ExtensionFilter::All
    }

    pub fn matches(&self, video: &VideoDescriptor) -> bool {
        let query = self.name_query.to_lowercase();
        video.file_name.to_lowercase().contains(&query) && self.extension.matches(&video.extension)
    }
}

pub fn apply<'a>(
    videos: impl IntoIterator<Item = &'a VideoDescriptor>,
    criteria: &FilterCriteria,
) -> Vec<&'a VideoDescriptor> {
    videos.into_iter().filter(|v| criteria.matches(v)).collect()
}

/// The extension filter is only worth offering when there is a choice to make.
pub fn extension_filter_available(extensions: &[String]) -> bool {
    extensions.len() > 1
}
