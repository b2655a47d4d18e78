//! /export handler.

use super::CommandContext;
use crate::commands::output::CommandOutput;
use crate::commands::router::ExportRequest;

/// Handle /export sheet|query|all.
pub async fn handle_export(ctx: &mut CommandContext<'_>, request: ExportRequest) -> CommandOutput {
    let file = match &request {
        ExportRequest::Sheet(name) => ctx.session.export_sheet(name.as_deref()).await,
        ExportRequest::Query => ctx.session.export_query().await,
        ExportRequest::All => ctx.session.export_all().await,
    };

    match file.and_then(|file| file.save_to(ctx.output_dir)) {
        Ok(path) => CommandOutput::info(format!("Exported {}", path.display())),
        Err(e) => CommandOutput::error(e.to_string()),
    }
}
