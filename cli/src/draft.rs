use crate::cli::BlockKind;
use crate::error::Result;
use crate::ui;
use boundary::{BlockDraft, RealmBlocks};

#[derive(Debug, Clone)]
pub struct DraftArgs {
    pub block: BlockKind,
    pub realm: String,
    pub index: usize,
    pub series: Option<String>,
    pub event: Option<String>,
    pub text: Option<String>,
}

pub fn execute(args: DraftArgs) -> Result<()> {
    let input = build(args)?;
    ui::success_message("Block is ready to be saved");
    println!("{}", serde_json::to_string_pretty(&input)?);
    Ok(())
}

fn build(args: DraftArgs) -> Result<serde_json::Value> {
    let mut draft = match args.block {
        BlockKind::Text => BlockDraft::text(),
        BlockKind::Series => BlockDraft::series(),
        BlockKind::Video => BlockDraft::video(),
    };

    if let Some(text) = args.text {
        draft = draft.with_text(text);
    }
    if let Some(series) = args.series {
        draft = draft.with_series(series)?;
    }
    if let Some(event) = args.event {
        draft = draft.with_event(event)?;
    }

    let mut realm = RealmBlocks::new(args.realm, Vec::new());
    let index = realm.add_block(args.index, draft);
    tracing::debug!(realm = %realm.realm_id, requested = args.index, index, "draft block inserted");

    match realm.commit_pending() {
        Some(input) => Ok(input?),
        None => Ok(serde_json::Value::Null),
    }
}
