use anyhow::Result;
use snag_config::SnagConfig;
use snag_core::OutputFormat;

pub(crate) fn handle_config_show(cd: Option<String>, format: OutputFormat) -> Result<()> {
    let project_root = crate::determine_project_root(cd.as_deref())?;
    let config = SnagConfig::load(&project_root);

    match format {
        OutputFormat::Json => {
            let json_str = serde_json::to_string_pretty(&config)?;
            println!("{}", json_str);
        }
        OutputFormat::Text => {
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}
