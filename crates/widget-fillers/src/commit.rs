use page_dom::{Document, DomError, EventKind, NodeId};

/// The event sequence reactive pages need after a programmatic write.
pub fn commit(doc: &mut Document, target: NodeId) -> Result<(), DomError> {
    doc.dispatch(target, EventKind::Input { data: None })?;
    doc.dispatch(target, EventKind::Change)?;
    doc.dispatch(target, EventKind::Blur)
}

/// Native value write followed by [`commit`].
pub fn write_text(doc: &mut Document, control: NodeId, value: &str) -> Result<(), DomError> {
    doc.set_value(control, value)?;
    commit(doc, control)
}

/// A select counts as populated once an option carrying a non-empty value
/// has been explicitly selected.
pub(crate) fn select_populated(doc: &Document, select: NodeId) -> bool {
    let Some(selected) = doc.selected_option(select) else {
        return false;
    };
    doc.options(select)
        .iter()
        .any(|opt| opt.node == selected && !opt.value.trim().is_empty())
}

pub(crate) fn control_empty(doc: &Document, control: NodeId) -> Result<bool, DomError> {
    Ok(doc.value(control)?.trim().is_empty())
}
