use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Markdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Button {
    Callback { label: String, data: String },
    Link { label: String, url: String },
}

impl Button {
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Button::Callback {
            label: label.into(),
            data: data.into(),
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Button::Link {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum PhotoSource {
    Url(String),
    Png(Vec<u8>),
}

impl std::fmt::Debug for PhotoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            PhotoSource::Png(bytes) => write!(f, "Png({} bytes)", bytes.len()),
        }
    }
}

/// Something the bot says back to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text {
        text: String,
        format: TextFormat,
        /// Inline keyboard, one inner vec per row.
        buttons: Vec<Vec<Button>>,
    },
    Photo {
        photo: PhotoSource,
        caption: String,
        format: TextFormat,
    },
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            format: TextFormat::Plain,
            buttons: Vec::new(),
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            format: TextFormat::Markdown,
            buttons: Vec::new(),
        }
    }

    pub fn with_buttons(self, rows: Vec<Vec<Button>>) -> Self {
        match self {
            Reply::Text { text, format, .. } => Reply::Text {
                text,
                format,
                buttons: rows,
            },
            photo => photo,
        }
    }

    pub fn photo(photo: PhotoSource, caption: impl Into<String>, format: TextFormat) -> Self {
        Reply::Photo {
            photo,
            caption: caption.into(),
            format,
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Text { text, .. } => Some(text),
            Reply::Photo { .. } => None,
        }
    }
}

/// Delivers replies to the chat the current event came from.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, reply: Reply) -> Result<()>;
}
