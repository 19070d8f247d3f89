use kube::runtime::events::{Event, EventType, Recorder};
use kube::Resource;

/// Publish a simple Normal event with given reason and note, ignoring errors.
pub async fn emit_info<R: Resource<DynamicType = ()>>(
    recorder: &Recorder,
    obj: &R,
    reason: &str,
    action: &str,
    note: impl Into<Option<String>>,
) {
    if let Err(e) = recorder
        .publish(
            &Event {
                type_: EventType::Normal,
                reason: reason.into(),
                note: note.into(),
                action: action.into(),
                secondary: None,
            },
            &obj.object_ref(&()),
        )
        .await
    {
        tracing::debug!("failed to publish {reason} event: {e}");
    }
}
