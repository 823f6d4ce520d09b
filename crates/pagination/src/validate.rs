use alpha_pagination_protocol::{HandlerRef, ViewState};

/// Check that the display carries exactly one alpha pagination area.
///
/// Handlers that are not (or no longer) on the display produce no messages.
pub fn validate_display(view: &ViewState, handler: &HandlerRef) -> Vec<String> {
    if view.handler(handler.handler_type, &handler.field_id).is_none() {
        return Vec::new();
    }

    let areas = view.area_handlers();
    if areas.is_empty() {
        vec![format!(
            "The view \"{}:{}\" must have at least one configured alpha pagination area in either the header or footer to use \"{}\".",
            view.view_id, view.display_id, handler.field_id
        )]
    } else if areas.len() > 1 {
        vec![format!(
            "The view \"{}:{}\" can only have one configured alpha pagination area in either the header or footer.",
            view.view_id, view.display_id
        )]
    } else {
        Vec::new()
    }
}
