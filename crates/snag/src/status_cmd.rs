use anyhow::Result;
use snag_config::SnagConfig;
use snag_core::OutputFormat;
use snag_memory::ReflectionLog;
use snag_status::{StatusReport, pending_count, pending_reminder};

pub(crate) fn handle_status(cd: Option<String>, format: OutputFormat) -> Result<()> {
    let project_root = crate::determine_project_root(cd.as_deref())?;
    let config = SnagConfig::load(&project_root);
    let reflections = ReflectionLog::for_project(&project_root, &config.log).load_all()?;
    let report = StatusReport::from_reflections(&reflections, &config.status);

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print!("{}", report.render_text()),
    }
    Ok(())
}

pub(crate) fn handle_pending(cd: Option<String>) -> Result<()> {
    let project_root = crate::determine_project_root(cd.as_deref())?;
    let config = SnagConfig::load(&project_root);
    let reflections = ReflectionLog::for_project(&project_root, &config.log).load_all()?;

    if let Some(reminder) = pending_reminder(
        pending_count(&reflections),
        config.status.pending_reminder_threshold,
    ) {
        println!("{reminder}");
    }
    Ok(())
}
