//! Text-view update functions for the single-editor mode

use ropey::Rope;

use crate::commands::Cmd;
use crate::messages::TextMsg;
use crate::model::AppModel;

use super::pipeline::schedule_auto_run;

/// Handle text-view messages
pub fn update_text(model: &mut AppModel, msg: TextMsg) -> Option<Cmd> {
    match msg {
        TextMsg::Edited { contents } => {
            {
                let buf = model.view.as_text_mut()?;
                buf.buffer = Rope::from(contents.as_str());
                buf.highlights.clear();
            }
            model.pipeline.bump_revision();
            model.rhs.mark_outdated();
            model.file.is_modified = true;
            schedule_auto_run(model)
        }
    }
}
