//! Local drafts of new realm content blocks.
//!
//! A freshly added block lives only in the client until it is saved. Series
//! and video blocks require a series/event reference that the editor has not
//! chosen yet, so drafts start out pointing at placeholder records. A draft
//! can only be committed after every placeholder was replaced by a real id.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Id of a block that has not been saved yet.
pub const NEW_BLOCK_ID: &str = "clNEWBLOCK";
/// Placeholder series of a new series block.
pub const NO_SERIES_ID: &str = "clNOSERIES";
/// Placeholder event of a new video block.
pub const NO_EVENT_ID: &str = "clNOEVENT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("{block} block still references placeholder {placeholder}, pick a real {field} before saving")]
    PlaceholderReference {
        block: BlockType,
        field: &'static str,
        placeholder: &'static str,
    },

    #[error("'{id}' is a placeholder id and cannot be used as a real reference")]
    SentinelId { id: String },

    #[error("Realm id must not be empty")]
    MissingRealm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Text,
    Series,
    Video,
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "Text",
            Self::Series => "Series",
            Self::Video => "Video",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoListOrder {
    #[default]
    NewToOld,
    OldToNew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoListLayout {
    #[default]
    Grid,
    List,
}

/// Reference from a block to another entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    /// Stand-in record until the editor picks a real entity.
    Placeholder(&'static str),
    Id(String),
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Placeholder(id) => id,
            Self::Id(id) => id,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    fn real(id: impl Into<String>) -> Result<Self, DraftError> {
        let id = id.into();
        if [NEW_BLOCK_ID, NO_SERIES_ID, NO_EVENT_ID].contains(&id.as_str()) {
            return Err(DraftError::SentinelId { id });
        }
        Ok(Self::Id(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text {
        content: String,
    },
    Series {
        series: EntityRef,
        order: VideoListOrder,
        layout: VideoListLayout,
        show_title: bool,
    },
    Video {
        event: EntityRef,
        show_title: bool,
    },
}

/// A block being edited that has not been saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDraft {
    pub id: String,
    pub edit_mode: bool,
    pub content: BlockContent,
}

impl BlockDraft {
    fn with_content(content: BlockContent) -> Self {
        Self {
            id: NEW_BLOCK_ID.to_string(),
            edit_mode: true,
            content,
        }
    }

    pub fn text() -> Self {
        Self::with_content(BlockContent::Text {
            content: String::new(),
        })
    }

    pub fn series() -> Self {
        Self::with_content(BlockContent::Series {
            series: EntityRef::Placeholder(NO_SERIES_ID),
            order: VideoListOrder::NewToOld,
            layout: VideoListLayout::Grid,
            show_title: true,
        })
    }

    pub fn video() -> Self {
        Self::with_content(BlockContent::Video {
            event: EntityRef::Placeholder(NO_EVENT_ID),
            show_title: true,
        })
    }

    pub fn block_type(&self) -> BlockType {
        match self.content {
            BlockContent::Text { .. } => BlockType::Text,
            BlockContent::Series { .. } => BlockType::Series,
            BlockContent::Video { .. } => BlockType::Video,
        }
    }

    /// Set the text of a text block. Ignored for other block types.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        if let BlockContent::Text { content } = &mut self.content {
            *content = text.into();
        }
        self
    }

    /// Replace the placeholder series. Ignored for non-series blocks.
    pub fn with_series(mut self, id: impl Into<String>) -> Result<Self, DraftError> {
        if let BlockContent::Series { series, .. } = &mut self.content {
            *series = EntityRef::real(id)?;
        }
        Ok(self)
    }

    /// Replace the placeholder event. Ignored for non-video blocks.
    pub fn with_event(mut self, id: impl Into<String>) -> Result<Self, DraftError> {
        if let BlockContent::Video { event, .. } = &mut self.content {
            *event = EntityRef::real(id)?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_order(mut self, new_order: VideoListOrder) -> Self {
        if let BlockContent::Series { order, .. } = &mut self.content {
            *order = new_order;
        }
        self
    }

    #[must_use]
    pub fn with_layout(mut self, new_layout: VideoListLayout) -> Self {
        if let BlockContent::Series { layout, .. } = &mut self.content {
            *layout = new_layout;
        }
        self
    }

    #[must_use]
    pub fn with_show_title(mut self, show: bool) -> Self {
        match &mut self.content {
            BlockContent::Series { show_title, .. } | BlockContent::Video { show_title, .. } => {
                *show_title = show;
            }
            BlockContent::Text { .. } => {}
        }
        self
    }

    /// Check that the draft no longer references any placeholder record.
    pub fn validate(&self) -> Result<(), DraftError> {
        match &self.content {
            BlockContent::Text { .. } => Ok(()),
            BlockContent::Series { series, .. } if series.is_placeholder() => {
                Err(DraftError::PlaceholderReference {
                    block: BlockType::Series,
                    field: "series",
                    placeholder: NO_SERIES_ID,
                })
            }
            BlockContent::Video { event, .. } if event.is_placeholder() => {
                Err(DraftError::PlaceholderReference {
                    block: BlockType::Video,
                    field: "event",
                    placeholder: NO_EVENT_ID,
                })
            }
            BlockContent::Series { .. } | BlockContent::Video { .. } => Ok(()),
        }
    }

    /// Variables for the mutation that saves this block at `index` of `realm`.
    pub fn commit_input(&self, realm: &str, index: usize) -> Result<Value, DraftError> {
        if realm.is_empty() {
            return Err(DraftError::MissingRealm);
        }
        self.validate()?;

        let block = match &self.content {
            BlockContent::Text { content } => json!({ "content": content }),
            BlockContent::Series {
                series,
                order,
                layout,
                show_title,
            } => json!({
                "series": series.id(),
                "order": order,
                "layout": layout,
                "showTitle": show_title,
            }),
            BlockContent::Video { event, show_title } => json!({
                "event": event.id(),
                "showTitle": show_title,
            }),
        };

        Ok(json!({
            "realm": realm,
            "index": index,
            "type": self.block_type(),
            "block": block,
        }))
    }
}

/// Local copy of a realm's block list, with drafts spliced in.
#[derive(Debug, Clone, Default)]
pub struct RealmBlocks {
    pub realm_id: String,
    blocks: Vec<BlockDraft>,
}

impl RealmBlocks {
    pub fn new(realm_id: impl Into<String>, blocks: Vec<BlockDraft>) -> Self {
        Self {
            realm_id: realm_id.into(),
            blocks,
        }
    }

    /// Insert a draft at `index`, clamped to the end of the list. Returns the
    /// index it ended up at.
    pub fn add_block(&mut self, index: usize, draft: BlockDraft) -> usize {
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, draft);
        index
    }

    pub fn blocks(&self) -> &[BlockDraft] {
        &self.blocks
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BlockDraft> {
        self.blocks.get_mut(index)
    }

    /// Index of the unsaved block, if any.
    pub fn pending(&self) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == NEW_BLOCK_ID)
    }

    /// Mutation input for the unsaved block, if there is one.
    pub fn commit_pending(&self) -> Option<Result<Value, DraftError>> {
        let index = self.pending()?;
        Some(self.blocks[index].commit_input(&self.realm_id, index))
    }
}
