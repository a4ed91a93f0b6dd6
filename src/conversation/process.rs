//! Resolution of per-item stage changes.

use crate::{
    events::{PortraitChange, Visibility},
    record::ConversationItem,
    Playthrough,
};

/// Resolve the portrait change requested by an item, if any.
///
/// Items without a known speaker request no change. A speaker who is not
/// currently on screen stays hidden unless the item names a portrait
/// explicitly; this keeps characters who only exist as a voice from
/// popping onto the stage with a stale portrait.
///
/// Updates the playthrough's on-screen bookkeeping to match the change.
pub fn stage_change(
    item: &ConversationItem,
    active_speaker: &Option<String>,
    playthrough: &mut Playthrough,
) -> Option<PortraitChange> {
    let character = active_speaker.clone()?;

    let mut hide = item.hide;

    if !playthrough.is_on_screen(&character) && item.portrait.is_none() {
        hide = true;
    }

    playthrough.set_on_screen(&character, !hide);

    Some(PortraitChange {
        character,
        portrait: item.portrait.clone(),
        from_position: item.from_position.clone(),
        to_position: item.to_position.clone(),
        facing: item.facing,
        flip: item.flip,
        visibility: if hide {
            Visibility::Hide
        } else {
            Visibility::Show
        },
    })
}
