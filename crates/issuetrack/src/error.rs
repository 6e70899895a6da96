use issuetrack_store::StoreError;

/// Render a command failure with its causes, plus a next step when the data
/// directory was never initialized.
pub fn format_error(err: &anyhow::Error) -> String {
    let mut lines = vec![format!("error: {err}")];
    lines.extend(err.chain().skip(1).map(|cause| format!("  caused by: {cause}")));

    let uninitialized = err.chain().find_map(|cause| match cause.downcast_ref::<StoreError>() {
        Some(StoreError::NotInitialized(dir)) => Some(dir.display().to_string()),
        _ => None,
    });
    if let Some(dir) = uninitialized {
        lines.push(format!("  hint: run `issuetrack init --dir {dir}`"));
    }
    lines.join("\n")
}
